//! Typed rows for the three nuclear data tables
//!
//! The field names mirror the CSV headers of the source database. Every
//! numeric column is read leniently: decimal commas are accepted, malformed
//! values read as absent, and unknown columns are ignored entirely so that
//! hand-edited databases keep loading.

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::Error;

/// One row of the activation table
///
/// Describes a single neutron capture channel `parent -> daughter` with its
/// thermal cross section. The daughter decay constant and parent natural
/// abundance ride along as optional columns.
#[derive(Serialize, Deserialize, Debug, Default, Clone)]
#[serde(default)]
pub struct ActivationRecord {
    /// Parent element symbol
    #[serde(rename = "Symbol")]
    pub symbol: String,

    /// Parent mass number
    #[serde(rename = "A", deserialize_with = "lenient_u32")]
    pub mass: u32,

    /// Daughter nuclide identifier
    #[serde(rename = "Daughter_Isotope")]
    pub daughter: String,

    /// Reaction channel, e.g. `ng`, `np`, `na`
    #[serde(rename = "Reaction")]
    pub reaction: String,

    /// Thermal cross section (barns)
    #[serde(rename = "Max_XS", deserialize_with = "lenient_f64")]
    pub sigma: Option<f64>,

    /// Decay constant of the daughter (1/s)
    #[serde(rename = "Decay_Constant_Lambda", deserialize_with = "lenient_f64")]
    pub daughter_lambda: Option<f64>,

    /// Natural abundance fraction of the parent, in (0, 1]
    #[serde(rename = "Abundance", deserialize_with = "lenient_f64")]
    pub abundance: Option<f64>,
}

/// One row of the decay table
#[derive(Serialize, Deserialize, Debug, Default, Clone)]
#[serde(default)]
pub struct DecayRecord {
    /// Decaying nuclide identifier
    #[serde(rename = "Parent_Isotope")]
    pub parent: String,

    /// Populated daughter identifier
    #[serde(rename = "Child_Isotope")]
    pub daughter: String,

    /// Fraction of parent decays populating this daughter, in (0, 1]
    #[serde(rename = "Branching_Ratio", deserialize_with = "lenient_f64")]
    pub branching: Option<f64>,

    /// Decay constant of the parent (1/s)
    #[serde(rename = "Parent_Lambda", deserialize_with = "lenient_f64")]
    pub parent_lambda: Option<f64>,

    /// Decay constant of the daughter (1/s)
    #[serde(rename = "Child_Lambda", deserialize_with = "lenient_f64")]
    pub daughter_lambda: Option<f64>,
}

/// One row of the regulatory limits table
///
/// Either column may be blank. A missing value means "no limit for this
/// kind", which excludes the nuclide from the corresponding compliance sums.
#[derive(Serialize, Deserialize, Debug, Default, Clone)]
#[serde(default)]
pub struct LimitRecord {
    /// Nuclide identifier
    #[serde(rename = "Isotope")]
    pub nuclide: String,

    /// Clearance limit (Bq/g)
    #[serde(rename = "Limit_Clearance_Bq_g", deserialize_with = "lenient_f64")]
    pub clearance: Option<f64>,

    /// Exemption limit (Bq/g)
    #[serde(rename = "Limit_Exemption_Bq_g", deserialize_with = "lenient_f64")]
    pub exemption: Option<f64>,
}

/// The reaction channels understood by the engine
///
/// Activation channels are single-daughter neutron captures; `Decay` edges
/// rely on the parent decay constant rather than a cross section.
///
/// The `FromStr` trait covers the spellings seen in the wild:
///
/// ```rust
/// # use naa_data::Reaction;
/// assert_eq!("ng".parse::<Reaction>().unwrap(), Reaction::NGamma);
/// assert_eq!("(n,γ)".parse::<Reaction>().unwrap(), Reaction::NGamma);
/// assert_eq!("N,A".parse::<Reaction>().unwrap(), Reaction::NAlpha);
/// ```
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Reaction {
    /// Radiative capture (n,γ)
    NGamma,
    /// Proton emission (n,p)
    NProton,
    /// Alpha emission (n,α)
    NAlpha,
    /// Radioactive decay
    Decay,
}

impl std::str::FromStr for Reaction {
    type Err = Error;

    fn from_str(s: &str) -> core::result::Result<Self, Error> {
        // strip the decoration people put around channel names
        let normalised: String = s
            .to_lowercase()
            .chars()
            .filter(|c| !matches!(c, ' ' | '(' | ')' | ',' | '-'))
            .collect();

        match normalised.as_str() {
            "nγ" | "ng" | "ngamma" => Ok(Reaction::NGamma),
            "np" | "nproton" => Ok(Reaction::NProton),
            "nα" | "na" | "nalpha" => Ok(Reaction::NAlpha),
            "decay" => Ok(Reaction::Decay),
            _ => Err(Error::UnknownReaction {
                hint: s.to_string(),
            }),
        }
    }
}

impl std::fmt::Display for Reaction {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let label = match self {
            Reaction::NGamma => "(n,γ)",
            Reaction::NProton => "(n,p)",
            Reaction::NAlpha => "(n,α)",
            Reaction::Decay => "decay",
        };
        write!(f, "{label}")
    }
}

/// Parse a numeric field the way the source tables need
///
/// Tolerates surrounding whitespace, a decimal comma, and scientific
/// notation. Anything else reads as absent.
pub(crate) fn parse_number(raw: &str) -> Option<f64> {
    let cleaned = raw.trim().replace(',', ".");
    if cleaned.is_empty() {
        return None;
    }
    cleaned.parse::<f64>().ok().filter(|value| value.is_finite())
}

/// Custom deserialiser for lenient optional floats
fn lenient_f64<'de, D>(deserializer: D) -> core::result::Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Deserialize::deserialize(deserializer)?;
    Ok(raw.as_deref().and_then(parse_number))
}

/// Custom deserialiser for lenient mass numbers, malformed reads as 0
fn lenient_u32<'de, D>(deserializer: D) -> core::result::Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Deserialize::deserialize(deserializer)?;
    Ok(raw
        .as_deref()
        .and_then(|s| s.trim().parse().ok())
        .unwrap_or(0))
}
