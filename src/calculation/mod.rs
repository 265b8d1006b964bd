//! Import of vehicle damage-assessment ("calculation") exports.
//!
//! The export is a loosely typed, deeply nested JSON document. Every field is
//! optional: numbers may arrive as numbers, punctuated strings or wrapper
//! objects (`{"_": "1 234,56"}`, `{"Val": 2, "Unit": "h"}`), and list fields
//! may hold a single record. Parsing reads a fixed set of paths through
//! [`lookup::Node`] and turns the billable totals into invoice line items.
//!
//! # Example
//!
//! ```
//! use faktura_vat::calculation::parse_calculation;
//! use rust_decimal_macros::dec;
//! use serde_json::json;
//!
//! let export = json!([{
//!     "ClaimID": "2024/12/ 001 ",
//!     "Calculation": {
//!         "SpareParts": { "PartDtls": { "PartDtl": {
//!             "PartDesc": "Reflektor", "PartNo": "5G0941005",
//!             "Price": { "_": "246,00" }, "Qty": { "Val": 2 }
//!         }}}
//!     }
//! }]);
//!
//! let import = parse_calculation(&export).unwrap();
//! assert_eq!(import.items[0].unit_net_price, dec!(123.00));
//! assert_eq!(import.invoice_number.as_deref(), Some("AUDATEX/2024/12/001"));
//! ```

mod error;
pub mod lookup;
mod parser;
mod text;

pub use error::ImportError;
pub use parser::*;
pub use text::clean_text;
