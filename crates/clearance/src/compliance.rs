//! Waste compliance evaluation against regulatory limits

// external crates
use log::debug;
use serde::{Deserialize, Serialize};

// naa modules
use naa_data::constants::SECONDS_PER_DAY;
use naa_data::{LimitKind, Store};
use naa_nuclide::Nuclide;
use naa_solver::{solve_element, Irradiation, Product};
use naa_utils::{f, OptionExt, ValueExt};

/// Cooling estimates beyond this read as "effectively never" (days)
///
/// A hundred years is far past any practical decay-storage horizon.
pub const CLEARANCE_HORIZON_DAYS: f64 = 36_525.0;

/// One elemental impurity in the sample, ppm by mass
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Impurity {
    /// Element symbol
    pub element: String,
    /// Concentration in the sample (ppm by mass)
    pub ppm: f64,
}

impl Impurity {
    /// Impurity from a symbol and concentration
    pub fn new(element: &str, ppm: f64) -> Self {
        Self {
            element: element.to_string(),
            ppm,
        }
    }
}

/// Per-nuclide contribution to the compliance sum
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct ComplianceRow {
    /// Product nuclide
    pub nuclide: Nuclide,
    /// Total activity in the sample (Bq)
    pub activity: f64,
    /// Specific activity in the waste stream (Bq/g)
    pub specific: f64,
    /// Limit evaluated against (Bq/g)
    pub limit: f64,
    /// Fraction of the limit consumed
    pub fraction: f64,
}

/// Aggregate verdict for the sample
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct ComplianceSummary {
    /// Σ of specific activity over limit across regulated nuclides
    pub sum_index: f64,
    /// True when the sum index is at or below one
    pub is_compliant: bool,
    /// Estimated cooling until compliant (days), `None` for effectively never
    ///
    /// Assumes the inventory decays at the dominant nuclide's rate, which is
    /// only conservative when that nuclide also has the largest decay
    /// constant. Treat it as an estimate.
    pub days_to_clear: Option<f64>,
    /// Nuclide consuming the largest share of the limit
    pub dominant: Option<Nuclide>,
}

/// Ranked per-nuclide rows plus the aggregate summary
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct ComplianceReport {
    /// Regulated nuclides, largest limit fraction first
    pub rows: Vec<ComplianceRow>,
    /// Aggregate verdict
    pub summary: ComplianceSummary,
}

impl ComplianceReport {
    /// Serialise to a JSON format string
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

impl std::fmt::Display for ComplianceReport {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let mut s = "Compliance report\n".to_string();
        for row in &self.rows {
            s += &f!(
                "  {:<9} {} Bq  {} Bq/g  limit {} Bq/g  fraction {}\n",
                row.nuclide.name(),
                row.activity.sci(4, 2),
                row.specific.sci(4, 2),
                row.limit.sci(4, 2),
                row.fraction.sci(4, 2)
            );
        }
        s += &f!(
            "  sum index {}, {}compliant, dominated by {}, days to clear {}\n",
            self.summary.sum_index.sci(4, 2),
            if self.summary.is_compliant { "" } else { "non-" },
            self.summary.dominant.as_ref().map(Nuclide::name).display(),
            self.summary.days_to_clear.display()
        );
        write!(f, "{s}")
    }
}

/// Evaluate a sample against a clearance or exemption limit vector
///
/// Each impurity contributes `ppm·main_mass·10⁻⁶` grams of its element; the
/// main element, when given, contributes the full `main_mass_g`. Product
/// activities are summed per nuclide across all contributors, divided by the
/// waste mass, and held against the chosen limits.
///
/// Unknown elements and nuclides without a limit of the chosen kind are
/// skipped with a diagnostic, never a failure; a lone impurity the library
/// knows nothing about simply contributes no activity.
pub fn compliance(
    store: &Store,
    impurities: &[Impurity],
    main_element: Option<&str>,
    main_mass_g: f64,
    scenario: &Irradiation,
    waste_mass_g: f64,
    kind: LimitKind,
) -> ComplianceReport {
    let mut inventory: Vec<(Nuclide, f64)> = Vec::new();

    for impurity in impurities {
        let mass = impurity.ppm * main_mass_g * 1.0e-6;
        if !mass.is_finite() || mass <= 0.0 {
            debug!("Impurity {} carries no mass, skipped", impurity.element);
            continue;
        }
        accumulate(
            &mut inventory,
            solve_element(store, &impurity.element, mass, scenario),
        );
    }

    if let Some(element) = main_element {
        accumulate(
            &mut inventory,
            solve_element(store, element, main_mass_g, scenario),
        );
    }

    let mut rows = Vec::new();
    for (nuclide, activity) in inventory {
        let Some(limit) = store.limit(&nuclide, kind) else {
            debug!("No {kind} limit for {nuclide}, excluded from the sum");
            continue;
        };
        let specific = activity / waste_mass_g;
        rows.push(ComplianceRow {
            fraction: specific / limit,
            nuclide,
            activity,
            specific,
            limit,
        });
    }
    rows.sort_by(|a, b| b.fraction.total_cmp(&a.fraction));

    let sum_index: f64 = rows.iter().map(|row| row.fraction).sum();
    let dominant = rows.first().map(|row| row.nuclide.clone());

    let summary = ComplianceSummary {
        sum_index,
        is_compliant: sum_index <= 1.0,
        days_to_clear: days_to_clear(store, sum_index, dominant.as_ref()),
        dominant,
    };

    ComplianceReport { rows, summary }
}

/// Sum product activities into the per-nuclide inventory
fn accumulate(inventory: &mut Vec<(Nuclide, f64)>, products: Vec<Product>) {
    for product in products {
        match inventory
            .iter_mut()
            .find(|(nuclide, _)| *nuclide == product.nuclide)
        {
            Some((_, activity)) => *activity += product.activity,
            None => inventory.push((product.nuclide, product.activity)),
        }
    }
}

/// Cooling time until the sum index reaches one, dominant-nuclide decay
///
/// Exact for a single-nuclide inventory, an estimate otherwise. Already
/// compliant samples need no cooling at all.
fn days_to_clear(store: &Store, sum_index: f64, dominant: Option<&Nuclide>) -> Option<f64> {
    if sum_index <= 1.0 {
        return Some(0.0);
    }

    let dominant = dominant?;
    if !store.is_radioactive(dominant) {
        return None;
    }

    let days = sum_index.ln() / store.lambda(dominant) / SECONDS_PER_DAY;
    (days.is_finite() && days < CLEARANCE_HORIZON_DAYS).then_some(days)
}
