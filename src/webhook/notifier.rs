use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::header::CONTENT_TYPE;
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use uuid::Uuid;

use super::{SIGNATURE_HEADER, WebhookError, sign_payload};
use crate::core::{InvoiceItem, Party};
use crate::settings::Settings;
use crate::store::Invoice;

pub const INVOICE_COMPLETED_EVENT: &str = "invoice_completed";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Body of the `invoice_completed` notification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WebhookPayload {
    pub event: String,
    pub invoice_id: Uuid,
    pub invoice_number: String,
    /// Persisted 2-dp gross total, e.g. `"1230.00"`.
    pub total_gross: String,
    pub buyer: Party,
    pub items: Vec<InvoiceItem>,
    pub completed_at: DateTime<Utc>,
}

impl WebhookPayload {
    pub fn for_invoice(invoice: &Invoice, completed_at: DateTime<Utc>) -> Self {
        Self {
            event: INVOICE_COMPLETED_EVENT.to_string(),
            invoice_id: invoice.id,
            invoice_number: invoice.draft.invoice_number.clone(),
            total_gross: invoice.total_gross.clone(),
            buyer: invoice.draft.buyer.clone(),
            items: invoice.draft.items.clone(),
            completed_at,
        }
    }
}

/// Receives the one-time completion event of an invoice.
#[async_trait]
pub trait CompletionNotifier: Send + Sync {
    async fn invoice_completed(&self, invoice: &Invoice) -> Result<(), WebhookError>;
}

/// POSTs a signed [`WebhookPayload`] to the invoice's `webhook_url`.
#[derive(Debug, Clone)]
pub struct HttpWebhookNotifier {
    client: reqwest::Client,
    secret: Option<Secret<String>>,
}

impl HttpWebhookNotifier {
    pub fn new(secret: Option<Secret<String>>) -> Result<Self, WebhookError> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| WebhookError::Network(e.to_string()))?;
        Ok(Self { client, secret })
    }

    pub fn from_settings(settings: &Settings) -> Result<Self, WebhookError> {
        Self::new(settings.webhook_secret.clone())
    }
}

#[async_trait]
impl CompletionNotifier for HttpWebhookNotifier {
    async fn invoice_completed(&self, invoice: &Invoice) -> Result<(), WebhookError> {
        let url = invoice
            .draft
            .webhook_url
            .as_deref()
            .filter(|u| !u.trim().is_empty())
            .ok_or(WebhookError::MissingUrl)?;
        let secret = self.secret.as_ref().ok_or(WebhookError::MissingSecret)?;

        let body = serde_json::to_vec(&WebhookPayload::for_invoice(invoice, Utc::now()))?;
        let signature = sign_payload(secret.expose_secret(), &body)?;

        debug!(invoice_id = %invoice.id, url, "sending completion webhook");

        let resp = self
            .client
            .post(url)
            .header(CONTENT_TYPE, "application/json")
            .header(SIGNATURE_HEADER, signature)
            .body(body)
            .send()
            .await
            .map_err(|e| WebhookError::Network(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(WebhookError::Status(status.as_u16()));
        }

        info!(invoice_id = %invoice.id, status = status.as_u16(), "completion webhook delivered");
        Ok(())
    }
}
