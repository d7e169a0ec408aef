//! Chain enumeration and the analytic Bateman activation solver
//!
#![doc = include_str!("../readme.md")]

pub mod bateman;

mod chain;
mod solve;

#[doc(inline)]
pub use chain::{enumerate, Chain, Step};

#[doc(inline)]
pub use solve::{
    solve, solve_advanced, solve_element, solve_element_advanced, Contribution, Irradiation,
    Product, ACTIVITY_FLOOR, DEFAULT_DEPTH,
};

// the physical constants live with the data model
pub use naa_data::constants;
