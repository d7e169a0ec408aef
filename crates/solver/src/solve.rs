//! Two-phase activation solves

// external crates
use log::debug;
use serde::{Deserialize, Serialize};

// naa modules
use naa_data::constants::{AVOGADRO, SECONDS_PER_DAY};
use naa_data::{Reaction, Store};
use naa_nuclide::Nuclide;
use naa_utils::ValueExt;

// internal modules
use crate::chain::enumerate;

/// Default chain depth cap
pub const DEFAULT_DEPTH: usize = 6;

/// Products with activity at or below this are dropped (Bq)
pub const ACTIVITY_FLOOR: f64 = 1.0e-20;

/// Flux and timing for one irradiation scenario
///
/// Shared by every solve and evaluation entry point so that signatures stay
/// at a sane arity.
#[derive(Serialize, Deserialize, Debug, Clone, Copy)]
pub struct Irradiation {
    /// Thermal neutron flux (n/cm2/s)
    pub flux: f64,
    /// Time in-core (s)
    pub irr_time: f64,
    /// Cooling time after removal from the core (s)
    pub cool_time: f64,
}

impl Irradiation {
    /// Scenario with times in seconds
    pub fn new(flux: f64, irr_time: f64, cool_time: f64) -> Self {
        Self {
            flux,
            irr_time,
            cool_time,
        }
    }

    /// Scenario with times in days
    ///
    /// ```rust
    /// # use naa_solver::Irradiation;
    /// let scenario = Irradiation::days(2.2e14, 14.0, 0.0);
    /// assert_eq!(scenario.irr_time, 14.0 * 86400.0);
    /// ```
    pub fn days(flux: f64, irr_days: f64, cool_days: f64) -> Self {
        Self::new(
            flux,
            irr_days * SECONDS_PER_DAY,
            cool_days * SECONDS_PER_DAY,
        )
    }
}

/// How a product was formed
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Contribution {
    /// Single edge from the starting nuclide, or bare survival of it
    Direct,
    /// Multi-step production
    Secondary,
}

/// One product nuclide at the end of a scenario
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Product {
    /// The product itself
    pub nuclide: Nuclide,
    /// Activity (Bq)
    pub activity: f64,
    /// Atom population
    pub atoms: f64,
    /// Cross section of the first capture edge (barns), 0 for pure decay
    pub first_xs: f64,
    /// Channel of the first capture edge
    pub reaction: Option<Reaction>,
    /// Production pathway of the largest contributor
    pub pathway: String,
    /// Single-edge or multi-step production
    pub contribution: Contribution,
    /// Starting nuclide this row came from
    pub parent: Nuclide,
}

impl std::fmt::Display for Product {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "{:<9} {} Bq  {} atoms  via {}",
            self.nuclide.name(),
            self.activity.sci(4, 2),
            self.atoms.sci(4, 2),
            self.pathway
        )
    }
}

/// Per-chain contribution before merging into products
struct PathYield {
    nuclide: Nuclide,
    atoms: f64,
    first: Option<(Reaction, f64)>,
    pathway: String,
    edges: usize,
}

/// Activation solve for a single starting nuclide
///
/// Unit natural abundance and the default depth cap; see [solve_advanced]
/// for control over both.
///
/// ```rust, no_run
/// # use naa_data::load::read_store;
/// # use naa_solver::{solve, Irradiation};
/// # let store = read_store("a.csv", "d.csv", "l.csv").unwrap();
/// let scenario = Irradiation::days(2.2e14, 14.0, 0.0);
/// let products = solve(&store, &"Lu-176".parse().unwrap(), 1.0, &scenario);
/// ```
pub fn solve(store: &Store, start: &Nuclide, mass_g: f64, scenario: &Irradiation) -> Vec<Product> {
    solve_advanced(store, start, mass_g, scenario, 1.0, DEFAULT_DEPTH)
}

/// Activation solve with explicit abundance and depth cap
///
/// The starting population is `mass·abundance·N_A/A` atoms. Irradiation
/// integrates every enumerated chain at the scenario flux; cooling then
/// restarts a decay-only enumeration from each surviving product, treating
/// each irradiation pathway as an independent source. Products are merged
/// per nuclide, floored at [ACTIVITY_FLOOR], and sorted by activity.
///
/// An unknown starting nuclide or element-only value yields an empty list.
pub fn solve_advanced(
    store: &Store,
    start: &Nuclide,
    mass_g: f64,
    scenario: &Irradiation,
    abundance: f64,
    depth: usize,
) -> Vec<Product> {
    if start.is_element() {
        debug!("Cannot solve a bare element, no mass number on {start}");
        return Vec::new();
    }

    let n0 = mass_g * abundance * AVOGADRO / f64::from(start.mass);
    if !n0.is_finite() || n0 <= 0.0 {
        return Vec::new();
    }

    // irradiation phase
    let mut yields: Vec<PathYield> = Vec::new();
    for chain in enumerate(store, start, scenario.flux, depth) {
        let atoms = chain.terminal_atoms(n0, scenario.irr_time);
        if atoms <= 0.0 {
            continue;
        }
        yields.push(PathYield {
            nuclide: chain.terminal().clone(),
            atoms,
            first: chain
                .first_activation()
                .map(|step| (step.reaction, step.sigma)),
            pathway: chain.pathway(),
            edges: chain.len(),
        });
    }

    // cooling phase, capture edges collapse at zero flux
    if scenario.cool_time > 0.0 {
        let mut cooled = Vec::new();
        for source in &yields {
            for chain in enumerate(store, &source.nuclide, 0.0, depth) {
                let atoms = chain.terminal_atoms(source.atoms, scenario.cool_time);
                if atoms <= 0.0 {
                    continue;
                }
                cooled.push(PathYield {
                    nuclide: chain.terminal().clone(),
                    atoms,
                    first: source.first,
                    pathway: chain.pathway_after(&source.pathway),
                    edges: source.edges + chain.len(),
                });
            }
        }
        yields = cooled;
    }

    let products = merge_yields(store, start, yields);
    finalise(products)
}

/// Expand an element into its natural isotopes and solve each
///
/// Identical product nuclides from different parents are merged; use
/// [solve_element_advanced] to keep the per-parent rows. Elements without
/// natural composition data yield an empty list.
pub fn solve_element(
    store: &Store,
    element: &str,
    total_mass_g: f64,
    scenario: &Irradiation,
) -> Vec<Product> {
    solve_element_advanced(store, element, total_mass_g, scenario, true)
}

/// Element solve with control over per-parent merging
pub fn solve_element_advanced(
    store: &Store,
    element: &str,
    total_mass_g: f64,
    scenario: &Irradiation,
    merge: bool,
) -> Vec<Product> {
    let mut rows = Vec::new();
    for isotope in store.isotopes_of(element) {
        let parent = Nuclide::new(element, isotope.mass);
        rows.extend(solve_advanced(
            store,
            &parent,
            total_mass_g * isotope.abundance,
            scenario,
            1.0,
            DEFAULT_DEPTH,
        ));
    }

    if merge {
        rows = merge_products(rows);
    }
    finalise(rows)
}

/// Merge per-chain yields into per-nuclide products
///
/// Converging pathways are summed; the merged row keeps the pathway and
/// first-capture metadata of its largest contributor, so descriptors are
/// representative rather than exhaustive.
fn merge_yields(store: &Store, parent: &Nuclide, yields: Vec<PathYield>) -> Vec<Product> {
    let mut products: Vec<Product> = Vec::new();
    // atom count of the current representative pathway, per product
    let mut representative: Vec<f64> = Vec::new();

    for path in yields {
        match products
            .iter_mut()
            .position(|product| product.nuclide == path.nuclide)
        {
            Some(index) => {
                products[index].atoms += path.atoms;
                if path.atoms > representative[index] {
                    representative[index] = path.atoms;
                    set_path_metadata(&mut products[index], &path);
                }
            }
            None => {
                representative.push(path.atoms);
                let mut product = Product {
                    nuclide: path.nuclide.clone(),
                    activity: 0.0,
                    atoms: path.atoms,
                    first_xs: 0.0,
                    reaction: None,
                    pathway: String::new(),
                    contribution: Contribution::Direct,
                    parent: parent.clone(),
                };
                set_path_metadata(&mut product, &path);
                products.push(product);
            }
        }
    }

    for product in &mut products {
        product.activity = product.atoms * store.lambda(&product.nuclide);
    }
    products
}

fn set_path_metadata(product: &mut Product, path: &PathYield) {
    let (reaction, sigma) = match path.first {
        Some((reaction, sigma)) => (Some(reaction), sigma),
        None => (None, 0.0),
    };
    product.reaction = reaction;
    product.first_xs = sigma;
    product.pathway = path.pathway.clone();
    product.contribution = if path.edges <= 1 {
        Contribution::Direct
    } else {
        Contribution::Secondary
    };
}

/// Merge already-built products from different parents per nuclide
pub(crate) fn merge_products(rows: Vec<Product>) -> Vec<Product> {
    let mut merged: Vec<Product> = Vec::new();
    let mut representative: Vec<f64> = Vec::new();

    for row in rows {
        match merged
            .iter_mut()
            .position(|product| product.nuclide == row.nuclide)
        {
            Some(index) => {
                merged[index].atoms += row.atoms;
                merged[index].activity += row.activity;
                if row.activity > representative[index] {
                    representative[index] = row.activity;
                    let atoms = merged[index].atoms;
                    let activity = merged[index].activity;
                    let mut replacement = row;
                    replacement.atoms = atoms;
                    replacement.activity = activity;
                    merged[index] = replacement;
                }
            }
            None => {
                representative.push(row.activity);
                merged.push(row);
            }
        }
    }
    merged
}

/// Apply the activity floor and the canonical descending sort
fn finalise(mut products: Vec<Product>) -> Vec<Product> {
    products.retain(|product| product.activity > ACTIVITY_FLOOR);
    products.sort_by(|a, b| b.activity.total_cmp(&a.activity));
    products
}
