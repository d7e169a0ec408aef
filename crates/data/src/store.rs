//! The immutable nuclear data store

use std::collections::{BTreeMap, HashMap};

// external crates
use log::{debug, warn};
use serde::{Deserialize, Serialize};

// naa modules
use naa_nuclide::Nuclide;
use naa_utils::StringExt;

// internal modules
use crate::constants::{BARN, LAMBDA_FLOOR};
use crate::error::{Error, Result};
use crate::record::{ActivationRecord, DecayRecord, LimitRecord, Reaction};

/// A neutron capture channel out of a parent nuclide
#[derive(Debug, Clone)]
pub struct ActivationEdge {
    /// Nuclide produced by the capture
    pub daughter: Nuclide,
    /// Thermal cross section (barns)
    pub sigma: f64,
    /// Capture channel
    pub reaction: Reaction,
}

/// A decay branch out of a parent nuclide
#[derive(Debug, Clone)]
pub struct DecayEdge {
    /// Nuclide populated by the decay
    pub daughter: Nuclide,
    /// Fraction of parent decays taking this branch, in (0, 1]
    pub branching: f64,
}

/// Natural composition entry for one isotope of an element
#[derive(Debug, Clone, Copy)]
pub struct NaturalIsotope {
    /// Mass number
    pub mass: u32,
    /// Natural abundance fraction, in (0, 1]
    pub abundance: f64,
}

/// Which regulatory limit column to evaluate against
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LimitKind {
    /// Release from regulatory control
    Clearance,
    /// Below the scope of regulation
    Exemption,
}

impl std::fmt::Display for LimitKind {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            LimitKind::Clearance => write!(f, "clearance"),
            LimitKind::Exemption => write!(f, "exemption"),
        }
    }
}

/// Clearance/exemption pair for one nuclide, `None` meaning no limit
#[derive(Debug, Default, Clone, Copy)]
struct LimitPair {
    clearance: Option<f64>,
    exemption: Option<f64>,
}

/// The nuclear data library behind every solve
///
/// Built once from parsed records and immutable from then on, so a single
/// store can back any number of concurrent solves by shared reference.
///
/// Per-parent edge lists and per-element isotope lists keep the insertion
/// order of the source tables, which is what makes enumeration and result
/// ordering reproducible between runs.
///
/// ```rust
/// # use naa_data::{ActivationRecord, Store};
/// let records = vec![ActivationRecord {
///     symbol: "Co".to_string(),
///     mass: 59,
///     daughter: "Co-60".to_string(),
///     reaction: "ng".to_string(),
///     sigma: Some(37.18),
///     daughter_lambda: Some(4.1666e-9),
///     abundance: Some(1.0),
/// }];
///
/// let store = Store::from_records(&records, &[], &[]).unwrap();
/// assert_eq!(store.len(), 1);
/// ```
#[derive(Debug, Default)]
pub struct Store {
    /// Capture channels keyed by parent
    activation: HashMap<Nuclide, Vec<ActivationEdge>>,
    /// Decay branches keyed by parent
    decay: HashMap<Nuclide, Vec<DecayEdge>>,
    /// Decay constants (1/s), absent means stable
    lambdas: HashMap<Nuclide, f64>,
    /// Total capture cross section out of each parent (barns)
    sigma_out: HashMap<Nuclide, f64>,
    /// Natural isotopes keyed by element symbol
    natural: BTreeMap<String, Vec<NaturalIsotope>>,
    /// Regulatory limits keyed by nuclide
    limits: HashMap<Nuclide, LimitPair>,
}

impl Store {
    /// Build the store from parsed table rows
    ///
    /// Individual bad rows are dropped with a `warn!` diagnostic. The only
    /// fatal condition is an activation table with nothing usable in it.
    pub fn from_records(
        activation: &[ActivationRecord],
        decay: &[DecayRecord],
        limits: &[LimitRecord],
    ) -> Result<Self> {
        if activation.is_empty() {
            return Err(Error::EmptyActivationTable);
        }

        let mut store = Store::default();
        for record in activation {
            store.add_activation(record);
        }

        // every row may have been dropped as malformed
        if store.activation.is_empty() {
            return Err(Error::EmptyActivationTable);
        }

        for record in decay {
            store.add_decay(record);
        }
        for record in limits {
            store.add_limit(record);
        }

        Ok(store)
    }

    /// Capture channels out of a parent, empty for unknown nuclides
    pub fn activation_edges(&self, parent: &Nuclide) -> &[ActivationEdge] {
        self.activation.get(parent).map(Vec::as_slice).unwrap_or_default()
    }

    /// Decay branches out of a parent, empty for unknown or stable nuclides
    pub fn decay_edges(&self, parent: &Nuclide) -> &[DecayEdge] {
        self.decay.get(parent).map(Vec::as_slice).unwrap_or_default()
    }

    /// Decay constant (1/s), 0 when absent
    pub fn lambda(&self, nuclide: &Nuclide) -> f64 {
        self.lambdas.get(nuclide).copied().unwrap_or(0.0)
    }

    /// True when the decay constant is meaningfully above zero
    pub fn is_radioactive(&self, nuclide: &Nuclide) -> bool {
        self.lambda(nuclide) > LAMBDA_FLOOR
    }

    /// Half-life in seconds derived from the decay constant
    pub fn half_life(&self, nuclide: &Nuclide) -> Option<f64> {
        self.is_radioactive(nuclide)
            .then(|| std::f64::consts::LN_2 / self.lambda(nuclide))
    }

    /// Total capture cross section out of a parent (barns)
    pub fn sigma_out(&self, parent: &Nuclide) -> f64 {
        self.sigma_out.get(parent).copied().unwrap_or(0.0)
    }

    /// Total removal rate per atom at the given flux (1/s)
    ///
    /// The probability rate of leaving this nuclide by any route, decay or
    /// further capture: λ + Φ·Σσ·10⁻²⁴.
    pub fn removal_rate(&self, nuclide: &Nuclide, flux: f64) -> f64 {
        self.lambda(nuclide) + flux * self.sigma_out(nuclide) * BARN
    }

    /// Natural isotopes of an element, empty for unknown symbols
    pub fn isotopes_of(&self, element: &str) -> &[NaturalIsotope] {
        self.natural
            .get(&element.trim().capitalise())
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Regulatory limit for a nuclide (Bq/g), `None` meaning no limit
    ///
    /// The two kinds are independent; a nuclide may carry one and not the
    /// other.
    pub fn limit(&self, nuclide: &Nuclide, kind: LimitKind) -> Option<f64> {
        let pair = self.limits.get(nuclide)?;
        match kind {
            LimitKind::Clearance => pair.clearance,
            LimitKind::Exemption => pair.exemption,
        }
    }

    /// Element symbols with natural composition data, sorted
    pub fn elements(&self) -> Vec<&str> {
        self.natural.keys().map(String::as_str).collect()
    }

    /// Number of capture channels held by the store
    pub fn len(&self) -> usize {
        self.activation.values().map(Vec::len).sum()
    }

    /// True when the store holds no capture channels
    pub fn is_empty(&self) -> bool {
        self.activation.is_empty()
    }

    fn add_activation(&mut self, record: &ActivationRecord) {
        if record.symbol.trim().is_empty() || record.mass == 0 {
            warn!(
                "Dropped activation record with no parent ({:?}, A={})",
                record.symbol, record.mass
            );
            return;
        }
        let parent = Nuclide::new(record.symbol.trim(), record.mass);

        let daughter: Nuclide = match record.daughter.parse() {
            Ok(daughter) => daughter,
            Err(_) => {
                warn!(
                    "Dropped activation record for {parent}, bad daughter \"{}\"",
                    record.daughter
                );
                return;
            }
        };

        let reaction: Reaction = match record.reaction.parse() {
            Ok(Reaction::Decay) => {
                warn!("Dropped activation record for {parent}, decay is not a capture channel");
                return;
            }
            Ok(reaction) => reaction,
            Err(_) => {
                warn!(
                    "Dropped activation record for {parent}, bad reaction \"{}\"",
                    record.reaction
                );
                return;
            }
        };

        let sigma = match record.sigma.unwrap_or(0.0) {
            sigma if sigma < 0.0 => {
                warn!("Negative cross section for {parent} read as 0");
                0.0
            }
            sigma => sigma,
        };

        *self.sigma_out.entry(parent.clone()).or_default() += sigma;
        self.set_lambda(&daughter, record.daughter_lambda);
        if let Some(abundance) = record.abundance {
            self.add_natural(&parent, abundance);
        }

        self.activation.entry(parent).or_default().push(ActivationEdge {
            daughter,
            sigma,
            reaction,
        });
    }

    fn add_decay(&mut self, record: &DecayRecord) {
        let parent: Nuclide = match record.parent.parse() {
            Ok(parent) => parent,
            Err(_) => {
                warn!("Dropped decay record, bad parent \"{}\"", record.parent);
                return;
            }
        };
        let daughter: Nuclide = match record.daughter.parse() {
            Ok(daughter) => daughter,
            Err(_) => {
                warn!("Dropped decay record, bad daughter \"{}\"", record.daughter);
                return;
            }
        };

        let branching = record.branching.unwrap_or(0.0);
        if !(0.0..=1.0).contains(&branching) || branching == 0.0 {
            warn!(
                "Dropped decay record {parent} -> {daughter}, branching {branching} outside (0, 1]"
            );
            return;
        }

        self.set_lambda(&parent, record.parent_lambda);
        self.set_lambda(&daughter, record.daughter_lambda);

        self.decay.entry(parent).or_default().push(DecayEdge {
            daughter,
            branching,
        });
    }

    fn add_limit(&mut self, record: &LimitRecord) {
        let nuclide: Nuclide = match record.nuclide.parse() {
            Ok(nuclide) => nuclide,
            Err(_) => {
                warn!("Dropped limit record, bad nuclide \"{}\"", record.nuclide);
                return;
            }
        };

        // zeros come from malformed numbers and mean "no limit"
        let clearance = record.clearance.filter(|limit| *limit > 0.0);
        let exemption = record.exemption.filter(|limit| *limit > 0.0);
        if clearance.is_none() && exemption.is_none() {
            debug!("Limit record for {nuclide} has no usable values");
        }

        let pair = self.limits.entry(nuclide).or_default();
        if pair.clearance.is_none() {
            pair.clearance = clearance;
        }
        if pair.exemption.is_none() {
            pair.exemption = exemption;
        }
    }

    /// Record a decay constant, first value wins on conflicting tables
    fn set_lambda(&mut self, nuclide: &Nuclide, lambda: Option<f64>) {
        let Some(lambda) = lambda else { return };
        if lambda <= LAMBDA_FLOOR {
            return;
        }

        let known = self.lambdas.entry(nuclide.clone()).or_insert(lambda);
        if (*known - lambda).abs() > 1.0e-6 * known.abs() {
            debug!("Conflicting decay constants for {nuclide}: {known} vs {lambda}");
        }
    }

    fn add_natural(&mut self, parent: &Nuclide, abundance: f64) {
        if !(abundance > 0.0 && abundance <= 1.0) {
            warn!("Abundance {abundance} for {parent} outside (0, 1], ignored");
            return;
        }

        let isotopes = self.natural.entry(parent.symbol.clone()).or_default();
        if isotopes.iter().any(|isotope| isotope.mass == parent.mass) {
            debug!("Duplicate abundance entry for {parent}");
            return;
        }

        isotopes.push(NaturalIsotope {
            mass: parent.mass,
            abundance,
        });
    }
}
