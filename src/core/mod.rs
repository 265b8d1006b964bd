//! Core invoice types, monetary rounding, totals, validation and numbering.
//!
//! Every amount is a [`rust_decimal::Decimal`] rounded with
//! [`money::round_currency`]; totals are accumulated in integer cents.

mod builder;
mod error;
pub mod format;
pub mod money;
pub mod numbering;
mod totals;
mod types;
mod validation;

pub use builder::*;
pub use error::*;
pub(crate) use error::join_errors;
pub use money::{parse_number, round_currency};
pub use totals::*;
pub use types::*;
pub use validation::*;
