//! Persisted invoices and their `draft → completed` workflow.
//!
//! [`InvoiceStore`] owns validation, recomputation and the completion
//! webhook; storage itself sits behind [`InvoiceRepository`].

mod error;
mod record;
mod repository;
mod service;

pub use error::StoreError;
pub use record::*;
pub use repository::*;
pub use service::*;
