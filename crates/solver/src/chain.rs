//! Simple-path enumeration of transmutation and decay chains

// external crates
use serde::Serialize;

// naa modules
use naa_data::constants::BARN;
use naa_data::{Reaction, Store};
use naa_nuclide::Nuclide;
use naa_utils::f;

// internal modules
use crate::bateman;

/// One edge of an enumerated chain
#[derive(Serialize, Debug, Clone)]
pub struct Step {
    /// Nuclide this edge lands on
    pub daughter: Nuclide,
    /// Channel that produced it
    pub reaction: Reaction,
    /// Production rate coefficient (1/s): σ·10⁻²⁴·Φ for captures, λ·β for decay
    pub rate: f64,
    /// Cross section of a capture edge (barns), 0 for decay
    pub sigma: f64,
}

/// One simple chain rooted at a starting nuclide
///
/// Carries everything the Bateman kernel needs: the per-edge production
/// rates and the per-node removal rates at the flux it was enumerated under.
/// The trivial chain of just the root is included, covering bare
/// survival/decay of the starting population.
#[derive(Serialize, Debug, Clone)]
pub struct Chain {
    start: Nuclide,
    steps: Vec<Step>,
    removals: Vec<f64>,
}

impl Chain {
    /// Terminal nuclide of the chain
    pub fn terminal(&self) -> &Nuclide {
        self.steps
            .last()
            .map(|step| &step.daughter)
            .unwrap_or(&self.start)
    }

    /// Number of edges in the chain
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// True for the trivial single-node chain
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// First capture edge along the chain, if there is one
    pub fn first_activation(&self) -> Option<&Step> {
        self.steps
            .iter()
            .find(|step| step.reaction != Reaction::Decay)
    }

    /// Atoms at the terminal after time `t`, from `n0` atoms at the root
    pub fn terminal_atoms(&self, n0: f64, t: f64) -> f64 {
        let rates: Vec<f64> = self.steps.iter().map(|step| step.rate).collect();
        bateman::terminal_atoms(n0, &rates, &self.removals, t)
    }

    /// Compact pathway descriptor, e.g. `Lu-176 →(n,γ) Lu-177 →decay Hf-177`
    pub fn pathway(&self) -> String {
        self.pathway_after(&self.start.name())
    }

    /// Pathway descriptor appended to an upstream descriptor
    ///
    /// Used to chain a cooling-phase descriptor onto the irradiation-phase
    /// pathway that produced this chain's root.
    pub(crate) fn pathway_after(&self, prefix: &str) -> String {
        let mut pathway = prefix.to_string();
        for step in &self.steps {
            pathway.push_str(&f!(" →{} {}", step.reaction, step.daughter));
        }
        pathway
    }
}

/// Enumerate every simple chain out of `start`, trivial chain included
///
/// Capture edges are only followed under a positive flux, decay edges only
/// out of radioactive nuclides. A nuclide never repeats within one chain,
/// which is what keeps isobaric capture/decay loops from cycling forever,
/// and chains stop at `depth` edges.
///
/// Order is deterministic: children are visited in the store's edge order,
/// captures before decays, depth first.
pub fn enumerate(store: &Store, start: &Nuclide, flux: f64, depth: usize) -> Vec<Chain> {
    let mut chains = Vec::new();
    let mut nodes = vec![start.clone()];
    let mut steps = Vec::new();
    let mut removals = vec![store.removal_rate(start, flux)];

    walk(
        store,
        flux,
        depth,
        &mut nodes,
        &mut steps,
        &mut removals,
        &mut chains,
    );
    chains
}

fn walk(
    store: &Store,
    flux: f64,
    depth: usize,
    nodes: &mut Vec<Nuclide>,
    steps: &mut Vec<Step>,
    removals: &mut Vec<f64>,
    chains: &mut Vec<Chain>,
) {
    chains.push(Chain {
        start: nodes[0].clone(),
        steps: steps.clone(),
        removals: removals.clone(),
    });

    if steps.len() == depth {
        return;
    }
    let parent = nodes.last().expect("chain always has a root").clone();

    if flux > 0.0 {
        for edge in store.activation_edges(&parent) {
            if nodes.contains(&edge.daughter) {
                continue;
            }
            steps.push(Step {
                daughter: edge.daughter.clone(),
                reaction: edge.reaction,
                rate: edge.sigma * BARN * flux,
                sigma: edge.sigma,
            });
            nodes.push(edge.daughter.clone());
            removals.push(store.removal_rate(&edge.daughter, flux));

            walk(store, flux, depth, nodes, steps, removals, chains);

            removals.pop();
            nodes.pop();
            steps.pop();
        }
    }

    if store.is_radioactive(&parent) {
        let lambda = store.lambda(&parent);
        for edge in store.decay_edges(&parent) {
            if nodes.contains(&edge.daughter) {
                continue;
            }
            steps.push(Step {
                daughter: edge.daughter.clone(),
                reaction: Reaction::Decay,
                rate: lambda * edge.branching,
                sigma: 0.0,
            });
            nodes.push(edge.daughter.clone());
            removals.push(store.removal_rate(&edge.daughter, flux));

            walk(store, flux, depth, nodes, steps, removals, chains);

            removals.pop();
            nodes.pop();
            steps.pop();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use naa_data::{ActivationRecord, DecayRecord};

    fn capture(symbol: &str, mass: u32, daughter: &str, sigma: f64, lambda: f64) -> ActivationRecord {
        ActivationRecord {
            symbol: symbol.to_string(),
            mass,
            daughter: daughter.to_string(),
            reaction: "ng".to_string(),
            sigma: Some(sigma),
            daughter_lambda: Some(lambda),
            abundance: None,
        }
    }

    fn decay(parent: &str, daughter: &str, lambda: f64) -> DecayRecord {
        DecayRecord {
            parent: parent.to_string(),
            daughter: daughter.to_string(),
            branching: Some(1.0),
            parent_lambda: Some(lambda),
            daughter_lambda: None,
        }
    }

    /// Lu-176 →(n,γ) Lu-177 →(n,γ) Lu-178, with both lutetiums decaying
    fn store() -> Store {
        Store::from_records(
            &[
                capture("Lu", 176, "Lu-177", 2090.0, 1.2069e-6),
                capture("Lu", 177, "Lu-178", 1000.0, 4.07e-4),
            ],
            &[
                decay("Lu-177", "Hf-177", 1.2069e-6),
                decay("Lu-178", "Hf-178", 4.07e-4),
            ],
            &[],
        )
        .unwrap()
    }

    #[test]
    fn includes_the_trivial_chain() {
        let chains = enumerate(&store(), &Nuclide::new("Lu", 176), 2.2e14, 6);
        assert!(chains[0].is_empty());
        assert_eq!(chains[0].terminal(), &Nuclide::new("Lu", 176));
    }

    #[test]
    fn depth_cap_respected() {
        for depth in 0..3 {
            let chains = enumerate(&store(), &Nuclide::new("Lu", 176), 2.2e14, depth);
            assert!(chains.iter().all(|chain| chain.len() <= depth));
        }
    }

    #[test]
    fn chains_are_simple() {
        let chains = enumerate(&store(), &Nuclide::new("Lu", 176), 2.2e14, 6);
        for chain in &chains {
            let mut nodes = vec![chain.start.clone()];
            for step in &chain.steps {
                assert!(!nodes.contains(&step.daughter));
                nodes.push(step.daughter.clone());
            }
        }
    }

    #[test]
    fn zero_flux_drops_capture_edges() {
        let chains = enumerate(&store(), &Nuclide::new("Lu", 177), 0.0, 6);
        assert!(chains
            .iter()
            .flat_map(|chain| &chain.steps)
            .all(|step| step.reaction == Reaction::Decay));

        // Lu-177 itself, and Lu-177 → Hf-177
        assert_eq!(chains.len(), 2);
    }

    #[test]
    fn capture_rates_scale_with_flux() {
        let flux = 2.2e14;
        let chains = enumerate(&store(), &Nuclide::new("Lu", 176), flux, 1);
        let capture = chains
            .iter()
            .find_map(|chain| chain.first_activation())
            .unwrap();
        assert!((capture.rate - 2090.0 * 1.0e-24 * flux).abs() < 1.0e-20);
    }

    #[test]
    fn pathway_descriptor_reads_along_the_chain() {
        let chains = enumerate(&store(), &Nuclide::new("Lu", 176), 2.2e14, 2);
        assert!(chains
            .iter()
            .any(|chain| chain.pathway() == "Lu-176 →(n,γ) Lu-177 →decay Hf-177"));
    }
}
