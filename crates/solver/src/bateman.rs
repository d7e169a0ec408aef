//! Closed-form Bateman integration of a linear chain
//!
//! For a chain of n nodes with per-edge production rates `k₁..k_{n−1}` and
//! per-node removal rates `μ₀..μ_{n−1}`, starting from N₀ atoms at the root
//! and none deeper, the terminal population at time t is
//!
//! ```text
//! N(t) = N₀ · ∏kᵢ · Σᵢ exp(−μᵢt) / ∏_{j≠i}(μⱼ − μᵢ)
//! ```
//!
//! The formula has removable singularities wherever two removal rates
//! coincide. Rather than switching to the exact limiting expression, nearly
//! equal rates are lifted apart by a fixed epsilon before the denominators
//! are formed. The induced error is orders of magnitude below engineering
//! tolerance for activity, and it keeps the output deterministic.

/// Removal rates closer than this are considered degenerate (1/s)
pub const EPS_DEGENERATE: f64 = 1.0e-12;

/// Offset applied to the later of two degenerate removal rates (1/s)
pub const DEGENERATE_LIFT: f64 = 1.0e-13;

/// Denominator magnitudes are clamped here to keep prefactors finite
pub const MIN_DENOMINATOR: f64 = 1.0e-50;

/// Terminal populations below this are discarded as noise (atoms)
pub const ATOM_FLOOR: f64 = 1.0e-25;

/// Atoms at the terminal node of a chain after time `t`
///
/// `rates` holds one production coefficient per edge and `removals` one
/// total removal rate per node, so `removals` is always one longer. A chain
/// of a single node is the pure-removal case `N₀·exp(−μ₀t)`.
///
/// Guarantees, for any finite non-negative inputs:
///
/// - the result is finite and non-negative
/// - a zero production coefficient anywhere yields exactly 0
/// - populations below [ATOM_FLOOR] are flushed to 0
pub fn terminal_atoms(n0: f64, rates: &[f64], removals: &[f64], t: f64) -> f64 {
    debug_assert_eq!(rates.len() + 1, removals.len());

    if n0 <= 0.0 {
        return 0.0;
    }

    // single node, nothing to feed through
    if removals.len() == 1 {
        return floor(n0 * (-removals[0] * t).exp());
    }

    // deeper nodes start empty
    if t <= 0.0 {
        return 0.0;
    }

    // a dead edge kills the whole chain
    let coefficient: f64 = rates.iter().product();
    if coefficient == 0.0 {
        return 0.0;
    }

    let mu = lift_degenerate(removals);

    let mut sum = 0.0;
    for i in 0..mu.len() {
        let mut denominator = 1.0;
        for j in 0..mu.len() {
            if j != i {
                denominator *= mu[j] - mu[i];
            }
        }
        if denominator.abs() < MIN_DENOMINATOR {
            denominator = MIN_DENOMINATOR.copysign(denominator);
        }
        sum += (-mu[i] * t).exp() / denominator;
    }

    floor(n0 * coefficient * sum)
}

/// Nudge nearly-equal removal rates apart so denominators stay usable
fn lift_degenerate(removals: &[f64]) -> Vec<f64> {
    let mut mu = removals.to_vec();
    for i in 0..mu.len() {
        for j in (i + 1)..mu.len() {
            if (mu[j] - mu[i]).abs() < EPS_DEGENERATE {
                mu[j] += DEGENERATE_LIFT;
            }
        }
    }
    mu
}

/// Flush non-finite, negative, and sub-floor populations to zero
fn floor(atoms: f64) -> f64 {
    if atoms.is_finite() && atoms >= ATOM_FLOOR {
        atoms
    } else {
        0.0
    }
}
