use thiserror::Error;

/// Fatal problems with a calculation export. Messages are user-facing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum ImportError {
    /// The payload is not valid JSON.
    #[error("invalid JSON: {0}")]
    Json(String),

    /// The first entry of the payload is not an object.
    #[error("invalid calculation data format")]
    InvalidFormat,

    /// The entry has no `Calculation` section.
    #[error("missing Calculation section")]
    MissingCalculation,

    /// The document is well-formed but carries nothing billable.
    #[error("no importable line items found")]
    NoImportableItems,
}
