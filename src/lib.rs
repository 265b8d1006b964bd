//! # faktura-vat
//!
//! Polish VAT invoices (faktura VAT) for car-repair shops: importing
//! damage-assessment calculation exports, computing per-rate VAT summaries
//! and totals, storing invoices through a `draft → completed` workflow and
//! notifying automation tools with signed webhooks.
//!
//! All monetary values use [`rust_decimal::Decimal`] rounded half away from
//! zero to two decimals. Totals are summed in integer cents.
//!
//! ## Quick Start
//!
//! ```rust
//! use chrono::NaiveDate;
//! use faktura_vat::core::*;
//! use rust_decimal_macros::dec;
//!
//! let seller = PartyBuilder::new("Auto Serwis Sp. z o.o.", "5260250274", "ul. Polna 3", "00-625 Warszawa")
//!     .bank("mBank", "ul. Prosta 18, Warszawa")
//!     .iban("PL61 1090 1014 0000 0712 1981 2874")
//!     .build();
//! let buyer = PartyBuilder::new("Jan Kowalski", "1234563218", "ul. Leśna 7", "05-500 Piaseczno").build();
//!
//! let invoice = InvoiceDraftBuilder::new("FV/12/2024", NaiveDate::from_ymd_opt(2024, 6, 15).unwrap())
//!     .issue_place("Warszawa")
//!     .seller(seller)
//!     .buyer(buyer)
//!     .add_item(InvoiceItemBuilder::new("Robocizna", dec!(2.5), "h", dec!(180)).build())
//!     .add_item(InvoiceItemBuilder::new("Klocki hamulcowe", dec!(1), "kpl", dec!(240)).build())
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(invoice.totals.net, dec!(690.00));
//! assert_eq!(invoice.totals.vat, dec!(158.70));
//! assert_eq!(invoice.totals.gross, dec!(848.70));
//! assert_eq!(format::amount_in_words(invoice.totals.gross), "osiemset czterdzieści osiem złotych siedemdziesiąt groszy");
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Description |
//! |---------|-------------|
//! | `core` (default) | Invoice types, totals, validation, numbering, Polish formatting |
//! | `import` | Calculation export import |
//! | `service` | Settings, invoice store, signed completion webhooks, automation intake |
//! | `all` | Everything |

#[cfg(feature = "core")]
pub mod core;

#[cfg(feature = "import")]
pub mod calculation;

#[cfg(feature = "service")]
pub mod settings;

#[cfg(feature = "service")]
pub mod store;

#[cfg(feature = "service")]
pub mod webhook;

#[cfg(feature = "service")]
pub mod automation;

// Re-export core types at crate root for convenience
#[cfg(feature = "core")]
pub use crate::core::*;
