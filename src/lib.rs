//! A semi-modular toolkit for neutron activation analysis and waste
//! clearance assessment
//!
#![doc = include_str!("../readme.md")]
#![deny(missing_docs, missing_debug_implementations)]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]

// Flatten the default crates
#[doc(inline)]
pub use naa_data as data;

#[doc(inline)]
pub use naa_nuclide as nuclide;

#[doc(inline)]
pub use naa_utils as utils;

// Re-exports of crates that are behind feature flags
#[cfg(feature = "solver")]
#[cfg_attr(docsrs, doc(cfg(feature = "solver")))]
#[doc(inline)]
pub use naa_solver as solver;

#[cfg(feature = "clearance")]
#[cfg_attr(docsrs, doc(cfg(feature = "clearance")))]
#[doc(inline)]
pub use naa_clearance as clearance;
