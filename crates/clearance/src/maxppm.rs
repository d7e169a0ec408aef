//! Maximum permissible impurity concentrations
//!
//! The inverse of the compliance sum: for a unit mass of each element, work
//! out how much specific activity ends up against each limit, then scale to
//! the concentration at which the waste would sit exactly on the limit.

// external crates
use itertools::Itertools;
use log::{debug, warn};
use serde::{Deserialize, Serialize};

// naa modules
use naa_data::{LimitKind, Reaction, Store};
use naa_nuclide::Nuclide;
use naa_solver::{solve_element_advanced, Irradiation};
use naa_utils::{f, ValueExt};

/// Limit indices per gram below this leave an element inert
const INERT_FLOOR: f64 = 1.0e-30;

/// Rows carrying less than this share of an element's index are dropped (%)
const SHARE_FLOOR: f64 = 1.0e-3;

/// An element to derive a ceiling for, with its reporting fractions
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct ElementSpec {
    /// Element symbol
    pub symbol: String,
    /// Fraction of the total composition this element makes up, in (0, 1]
    ///
    /// Reporting metadata only; it does not enter the ceiling formula.
    pub element_fraction: f64,
    /// Fraction of the waste stream attributed to this element, in (0, 1]
    pub waste_fraction: f64,
}

impl ElementSpec {
    /// Element at 100% of both fractions
    pub fn new(symbol: &str) -> Self {
        Self::with_fractions(symbol, 1.0, 1.0)
    }

    /// Element with explicit composition and waste-stream fractions
    pub fn with_fractions(symbol: &str, element_fraction: f64, waste_fraction: f64) -> Self {
        Self {
            symbol: symbol.to_string(),
            element_fraction,
            waste_fraction,
        }
    }
}

/// Scalar settings shared by a max-ppm derivation
#[derive(Serialize, Deserialize, Debug, Clone, Copy)]
pub struct MaxPpmSettings {
    /// Mass of the waste stream (g)
    pub waste_mass_g: f64,
    /// Mass of the sample (g)
    pub sample_mass_g: f64,
    /// Limit column to hold products against
    pub kind: LimitKind,
}

/// One pathway row of the max-ppm table
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct PpmRow {
    /// Element the ceiling applies to
    pub element: String,
    /// Parent isotope the activity comes from
    pub parent: Nuclide,
    /// First capture channel of the pathway
    pub reaction: Option<Reaction>,
    /// Product nuclide held against the limit
    pub nuclide: Nuclide,
    /// The limit itself (Bq/g)
    pub limit: f64,
    /// Ceiling if this pathway were the only contributor (ppm)
    pub max_ppm: f64,
    /// Share of the element's limit index (%)
    pub share_pct: f64,
    /// Product nuclide dominating the element's index
    pub limiting: Nuclide,
    /// Ceiling for the element as a whole (ppm)
    pub element_max_ppm: f64,
    /// Waste-stream fraction, as given (%)
    pub waste_pct: f64,
    /// Elemental composition fraction, as given (%)
    pub element_pct: f64,
}

impl std::fmt::Display for PpmRow {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "{:<2} {:<9} {} {:<9} max {} ppm  ({} ppm element-wide, {:.3}% share)",
            self.element,
            self.parent.name(),
            self.reaction.map(|r| f!("{r}")).unwrap_or_default(),
            self.nuclide.name(),
            self.max_ppm.sci(3, 2),
            self.element_max_ppm.sci(3, 2),
            self.share_pct
        )
    }
}

/// Derive per-element and per-pathway concentration ceilings
///
/// For every element, a unit-mass solve gives the specific activity per gram
/// attributable to each parent pathway. Holding each product against its
/// limit and summing gives the element's limit index per gram, and the
/// ceiling is the concentration at which that index exactly exhausts the
/// waste limit:
///
/// ```text
/// ppm = 10⁶ · waste_mass / (sample_mass · waste_fraction · Σᵢ aᵢ/Lᵢ)
/// ```
///
/// Elements with no regulated products are skipped as inert. Rows are
/// grouped by element, ascending, and by share within an element,
/// descending. Pathways below a 0.001% share are dropped as noise.
pub fn max_ppm(
    store: &Store,
    elements: &[ElementSpec],
    scenario: &Irradiation,
    settings: &MaxPpmSettings,
) -> Vec<PpmRow> {
    let mut table = Vec::new();

    for spec in elements
        .iter()
        .sorted_by(|a, b| a.symbol.cmp(&b.symbol))
    {
        let waste_fraction = checked_fraction(spec.waste_fraction, &spec.symbol);

        // specific activity per gram of element, split by parent pathway
        let products = solve_element_advanced(store, &spec.symbol, 1.0, scenario, false);

        let mut regulated = Vec::new();
        for product in products {
            let Some(limit) = store.limit(&product.nuclide, settings.kind) else {
                debug!(
                    "No {} limit for {}, excluded from {}",
                    settings.kind, product.nuclide, spec.symbol
                );
                continue;
            };
            let index = product.activity / limit;
            regulated.push((product, limit, index));
        }

        let total: f64 = regulated.iter().map(|(_, _, index)| index).sum();
        if total <= INERT_FLOOR {
            debug!("{} is effectively inert, skipped", spec.symbol);
            continue;
        }

        // product with the largest aggregate share of the element's index
        let mut by_product: Vec<(Nuclide, f64)> = Vec::new();
        for (product, _, index) in &regulated {
            match by_product
                .iter_mut()
                .find(|(nuclide, _)| nuclide == &product.nuclide)
            {
                Some((_, aggregate)) => *aggregate += index,
                None => by_product.push((product.nuclide.clone(), *index)),
            }
        }
        let limiting = by_product
            .iter()
            .max_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(nuclide, _)| nuclide.clone())
            .expect("at least one regulated product");

        let scale = 1.0e6 * settings.waste_mass_g / (settings.sample_mass_g * waste_fraction);
        let element_max_ppm = scale / total;

        let mut rows: Vec<PpmRow> = regulated
            .into_iter()
            .map(|(product, limit, index)| PpmRow {
                element: product.parent.symbol.clone(),
                parent: product.parent,
                reaction: product.reaction,
                nuclide: product.nuclide,
                limit,
                max_ppm: scale / index,
                share_pct: index / total * 100.0,
                limiting: limiting.clone(),
                element_max_ppm,
                waste_pct: waste_fraction * 100.0,
                element_pct: spec.element_fraction * 100.0,
            })
            .filter(|row| row.share_pct >= SHARE_FLOOR)
            .collect();

        rows.sort_by(|a, b| b.share_pct.total_cmp(&a.share_pct));
        table.extend(rows);
    }

    table
}

/// Fractions outside (0, 1] fall back to 100% with a warning
fn checked_fraction(fraction: f64, symbol: &str) -> f64 {
    if fraction > 0.0 && fraction <= 1.0 {
        fraction
    } else {
        warn!("Waste fraction {fraction} for {symbol} outside (0, 1], using 1.0");
        1.0
    }
}
