//! Thin CSV loader for the three data tables
//!
//! The engine itself only consumes parsed records; these readers are the
//! convenience boundary for callers holding the tables as files. Rows that
//! fail to deserialise are skipped with a diagnostic rather than failing the
//! whole table, matching the record-level leniency of [crate::record].

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

// external crates
use log::warn;
use serde::de::DeserializeOwned;

// internal modules
use crate::error::Result;
use crate::record::{ActivationRecord, DecayRecord, LimitRecord};
use crate::store::Store;

/// Read activation table rows from anything readable
pub fn activation_from_reader<R: Read>(reader: R) -> Result<Vec<ActivationRecord>> {
    records_from_reader(reader)
}

/// Read decay table rows from anything readable
pub fn decay_from_reader<R: Read>(reader: R) -> Result<Vec<DecayRecord>> {
    records_from_reader(reader)
}

/// Read limit table rows from anything readable
pub fn limits_from_reader<R: Read>(reader: R) -> Result<Vec<LimitRecord>> {
    records_from_reader(reader)
}

/// Read the activation table from a CSV file
pub fn read_activation_file<P: AsRef<Path>>(path: P) -> Result<Vec<ActivationRecord>> {
    activation_from_reader(open(path)?)
}

/// Read the decay table from a CSV file
pub fn read_decay_file<P: AsRef<Path>>(path: P) -> Result<Vec<DecayRecord>> {
    decay_from_reader(open(path)?)
}

/// Read the limits table from a CSV file
pub fn read_limit_file<P: AsRef<Path>>(path: P) -> Result<Vec<LimitRecord>> {
    limits_from_reader(open(path)?)
}

/// Build a [Store] straight from the three CSV files
///
/// ```rust, no_run
/// # use naa_data::load::read_store;
/// let store = read_store("activation.csv", "decay.csv", "limits.csv").unwrap();
/// ```
pub fn read_store<P: AsRef<Path>>(activation: P, decay: P, limits: P) -> Result<Store> {
    Store::from_records(
        &read_activation_file(activation)?,
        &read_decay_file(decay)?,
        &read_limit_file(limits)?,
    )
}

fn open<P: AsRef<Path>>(path: P) -> Result<BufReader<File>> {
    Ok(BufReader::new(File::open(path.as_ref())?))
}

/// Deserialise every usable row, skipping the rest with a diagnostic
fn records_from_reader<R: Read, T: DeserializeOwned>(reader: R) -> Result<Vec<T>> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut records = Vec::new();
    for (row, result) in csv_reader.deserialize().enumerate() {
        match result {
            Ok(record) => records.push(record),
            // +2 for the header line and one-based numbering
            Err(error) => warn!("Skipped row {}: {error}", row + 2),
        }
    }

    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn activation_table_with_decimal_commas() {
        let table = "\
Symbol,A,Daughter_Isotope,Reaction,Max_XS,Decay_Constant_Lambda,Abundance
Lu,176,Lu-177,ng,2090,\"1,2069e-6\",\"0,02599\"
Co,59,Co-60,ng,37.18,4.1666e-9,1.0
";
        let records = activation_from_reader(table.as_bytes()).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].sigma, Some(2090.0));
        assert_eq!(records[0].daughter_lambda, Some(1.2069e-6));
        assert_eq!(records[0].abundance, Some(0.02599));
    }

    #[test]
    fn unknown_columns_and_malformed_numbers_tolerated() {
        let table = "\
Symbol,A,Comment,Daughter_Isotope,Reaction,Max_XS
Fe,58,from 2021 review,Fe-59,ng,not-a-number
";
        let records = activation_from_reader(table.as_bytes()).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].symbol, "Fe");
        assert_eq!(records[0].sigma, None);
        assert_eq!(records[0].daughter_lambda, None);
    }

    #[test]
    fn limits_with_blanks() {
        let table = "\
Isotope,Limit_Clearance_Bq_g,Limit_Exemption_Bq_g
Co-60,0.1,10
Fe-55,1000,
";
        let records = limits_from_reader(table.as_bytes()).unwrap();
        assert_eq!(records[1].clearance, Some(1000.0));
        assert_eq!(records[1].exemption, None);
    }
}
