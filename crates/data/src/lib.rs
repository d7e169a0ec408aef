//! Nuclear data records and the immutable activation store
//!
#![doc = include_str!("../readme.md")]

pub mod constants;
pub mod load;

mod error;
mod record;
mod store;

#[doc(inline)]
pub use error::{Error, Result};

#[doc(inline)]
pub use record::{ActivationRecord, DecayRecord, LimitRecord, Reaction};

#[doc(inline)]
pub use store::{ActivationEdge, DecayEdge, LimitKind, NaturalIsotope, Store};
