//! Canonical nuclide identity and text parsing
//!
#![doc = include_str!("../readme.md")]

mod error;
mod parsers;

pub use error::{Error, Result};

// external crates
use serde::{Deserialize, Serialize};

// naa modules
use naa_utils::{f, StringExt};

/// Definition for a particular nuclide
///
/// The canonical text form is `<Symbol>-<A><state>`, e.g. `Lu-177`, `Tc-99m`.
/// Equality is equality of the full triple, so `Tc-99` and `Tc-99m` are
/// distinct nuclides.
///
/// The `FromStr` trait will try to parse a string in either of the two
/// conventions seen in nuclear data tables:
///
/// - symbol first: `Lu-177`, `lu_177`, `Co60`, `Hf-178m2`
/// - mass first: `177Lu`, `99mTc`
///
/// Case and `-`/`_` separators are normalised away. A bare element symbol
/// (`Fe`) parses to an element-only value with a mass number of zero, which
/// the element-level APIs accept.
///
/// ```rust
/// # use naa_nuclide::{IsomerState, Nuclide};
/// let nuclide: Nuclide = "99mTc".parse().unwrap();
/// assert_eq!(
///     nuclide,
///     Nuclide {
///         symbol: "Tc".to_string(),
///         mass: 99,
///         state: IsomerState::Metastable,
///     }
/// );
/// assert_eq!(nuclide.name(), "Tc-99m");
/// ```
#[derive(
    Serialize, Deserialize, Debug, Default, Clone, PartialEq, Eq, Hash, PartialOrd, Ord,
)]
pub struct Nuclide {
    /// Element symbol, title case e.g. 'He', 'Co'
    pub symbol: String,
    /// Mass number A (nucleons), 0 for a bare element
    pub mass: u32,
    /// Isomeric state
    pub state: IsomerState,
}

impl Nuclide {
    /// Ground state nuclide from a symbol and mass number
    ///
    /// The symbol is normalised to title case.
    ///
    /// ```rust
    /// # use naa_nuclide::Nuclide;
    /// assert_eq!(Nuclide::new("co", 60).name(), "Co-60");
    /// ```
    pub fn new(symbol: &str, mass: u32) -> Self {
        Self {
            symbol: symbol.capitalise(),
            mass,
            state: IsomerState::Ground,
        }
    }

    /// Element-only value with no mass number
    pub fn element(symbol: &str) -> Self {
        Self::new(symbol, 0)
    }

    /// True for element-only values produced by [Nuclide::element]
    pub fn is_element(&self) -> bool {
        self.mass == 0
    }

    /// A name for the nuclide with consistent formatting
    ///
    /// ```rust
    /// # use naa_nuclide::Nuclide;
    /// assert_eq!(Nuclide::new("lu", 177).name(), "Lu-177");
    /// assert_eq!(Nuclide::element("fe").name(), "Fe");
    /// ```
    pub fn name(&self) -> String {
        // special case for bare elements
        if self.mass == 0 {
            return self.symbol.clone();
        }

        f!("{}-{}{}", self.symbol, self.mass, self.state)
    }
}

impl std::str::FromStr for Nuclide {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        let (_, nuclide) =
            nom::combinator::all_consuming(parsers::nuclide)(trimmed).map_err(|_| {
                Error::Unrecognised {
                    text: trimmed.to_string(),
                }
            })?;
        Ok(nuclide)
    }
}

impl std::fmt::Display for Nuclide {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Variants of isomeric states
///
/// Most nuclides sit in the ground state. Long-lived isomers carry either a
/// bare `m` marker or the numbered `m1`, `m2`, ... notation, and the two are
/// kept distinct because source data tables use both.
#[derive(
    Serialize, Deserialize, Debug, Default, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord,
)]
pub enum IsomerState {
    /// Ground state, no marker
    #[default]
    Ground,
    /// Plain `m` marker with no level number
    Metastable,
    /// Numbered level in ENSDF notation, `m1`, `m2`, ...
    Excited(u8),
}

impl std::fmt::Display for IsomerState {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let state = match self {
            IsomerState::Ground => String::new(),
            IsomerState::Metastable => "m".to_string(),
            IsomerState::Excited(level) => f!("m{level}"),
        };
        write!(f, "{state}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonical_names() {
        assert_eq!(Nuclide::new("Lu", 177).name(), "Lu-177");

        let tc99m = Nuclide {
            symbol: "Tc".to_string(),
            mass: 99,
            state: IsomerState::Metastable,
        };
        assert_eq!(tc99m.name(), "Tc-99m");

        let hf178m2 = Nuclide {
            symbol: "Hf".to_string(),
            mass: 178,
            state: IsomerState::Excited(2),
        };
        assert_eq!(hf178m2.name(), "Hf-178m2");
    }

    #[test]
    fn parse_round_trip() {
        for name in ["Lu-177", "Tc-99m", "Hf-178m2", "Co-60", "Fe"] {
            let nuclide: Nuclide = name.parse().unwrap();
            assert_eq!(nuclide.name(), name);
        }
    }

    #[test]
    fn states_are_distinct() {
        let ground: Nuclide = "Tc-99".parse().unwrap();
        let isomer: Nuclide = "Tc-99m".parse().unwrap();
        assert_ne!(ground, isomer);
    }
}
