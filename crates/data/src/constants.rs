//! Physical constants shared across the toolkit

/// Avogadro constant (1/mol)
pub const AVOGADRO: f64 = 6.02214076e23;

/// One barn in cm2
pub const BARN: f64 = 1.0e-24;

/// Seconds in a day
pub const SECONDS_PER_DAY: f64 = 86_400.0;

/// Decay constants at or below this are treated as stable (1/s)
///
/// Source tables pad stable nuclides with zeros or denormal junk rather than
/// leaving the column blank, so "present" means above this floor.
pub const LAMBDA_FLOOR: f64 = 1.0e-40;
