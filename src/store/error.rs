use thiserror::Error;
use uuid::Uuid;

use crate::core::{InvoiceStatus, ValidationError, join_errors};
use crate::webhook::WebhookError;

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StoreError {
    #[error("invoice {0} not found")]
    NotFound(Uuid),

    #[error("validation failed: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),

    /// Completed invoices never return to draft.
    #[error("cannot change status from {from} to {to}")]
    InvalidTransition {
        from: InvoiceStatus,
        to: InvoiceStatus,
    },

    #[error("invoice {0} is not completed")]
    NotCompleted(Uuid),

    #[error(transparent)]
    Webhook(#[from] WebhookError),

    #[error("repository error: {0}")]
    Repository(String),
}

impl StoreError {
    pub fn validation_errors(&self) -> &[ValidationError] {
        match self {
            Self::Validation(errors) => errors,
            _ => &[],
        }
    }
}
