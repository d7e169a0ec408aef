//! Clearance/exemption compliance and maximum impurity limits
//!
#![doc = include_str!("../readme.md")]

mod compliance;
mod maxppm;

#[doc(inline)]
pub use compliance::{
    compliance, ComplianceReport, ComplianceRow, ComplianceSummary, Impurity,
    CLEARANCE_HORIZON_DAYS,
};

#[doc(inline)]
pub use maxppm::{max_ppm, ElementSpec, MaxPpmSettings, PpmRow};

// the limit kinds live with the data model
pub use naa_data::LimitKind;
