//! Signed `invoice_completed` notifications.
//!
//! The body is serialized once and signed with HMAC-SHA256 over the exact
//! bytes sent. Receivers check the `X-Webhook-Signature` header with
//! [`verify_signature`].

mod notifier;
mod signature;

pub use notifier::*;
pub use signature::*;

use thiserror::Error;

/// Errors while delivering a completion notification.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum WebhookError {
    /// `WEBHOOK_SECRET` is not configured; nothing is sent unsigned.
    #[error("webhook secret is not configured")]
    MissingSecret,

    #[error("invoice has no webhook url")]
    MissingUrl,

    #[error("webhook signing failed: {0}")]
    Signature(String),

    #[error("webhook payload serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("webhook network error: {0}")]
    Network(String),

    /// Receiver answered with a non-2xx status.
    #[error("webhook receiver returned HTTP {0}")]
    Status(u16),
}
