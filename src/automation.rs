//! Invoice intake for workflow automation tools.
//!
//! Requests are gated by a shared secret sent in [`AUTOMATION_SECRET_HEADER`]
//! and may omit almost everything: missing parties, items and numbers are
//! filled from [`Settings`] and fixed placeholders so the resulting draft
//! always validates and can be finished by hand at the returned edit URL.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};
use subtle::ConstantTimeEq;
use thiserror::Error;
use tracing::{info, warn};
use uuid::Uuid;

use crate::core::numbering::{automation_invoice_number, invoice_number_from_claim};
use crate::core::{
    DEFAULT_COPY_TYPE, DEFAULT_PAYMENT_TYPE, InvoiceDraft, InvoiceItem, Party, STANDARD_VAT_RATE,
};
use crate::settings::Settings;
use crate::store::{Invoice, InvoiceRepository, InvoiceStore, StoreError};
use crate::webhook::CompletionNotifier;

pub const AUTOMATION_SECRET_HEADER: &str = "X-Automation-Secret";

pub const DEFAULT_BUYER_NAME: &str = "Nabywca";
pub const DEFAULT_BUYER_TAX_ID: &str = "000-000-00-00";
pub const DEFAULT_BUYER_ADDRESS_1: &str = "Adres nabywcy";
pub const DEFAULT_BUYER_ADDRESS_2: &str = "Kod, Miasto";

pub const DEFAULT_ITEM_NAME: &str = "Usługa";
pub const DEFAULT_ITEM_UNIT: &str = "szt";

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum IntakeError {
    /// No automation secret is configured; intake is switched off.
    #[error("automation intake is not configured")]
    ServiceUnavailable,

    #[error("unauthorized")]
    Unauthorized,

    #[error("invalid webhook url: {0}")]
    InvalidWebhookUrl(String),

    #[error("webhook url domain not allowed: {0}")]
    WebhookDomainNotAllowed(String),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Invoice request from an automation workflow. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AutomationRequest {
    pub invoice_number: Option<String>,
    pub webhook_url: Option<String>,
    pub seller: Option<PartialParty>,
    pub buyer: Option<PartialParty>,
    pub items: Vec<PartialItem>,
    pub payment_terms: Option<String>,
    pub payment_type: Option<String>,
    pub document_notes: Option<String>,
    pub claim_number: Option<String>,
    pub vehicle: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PartialParty {
    pub name: Option<String>,
    #[serde(alias = "nip")]
    pub tax_id: Option<String>,
    pub address_line_1: Option<String>,
    pub address_line_2: Option<String>,
    pub phone: Option<String>,
    pub bank_name: Option<String>,
    pub bank_branch_address: Option<String>,
    pub iban: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PartialItem {
    pub name: Option<String>,
    pub code: Option<String>,
    #[serde(alias = "kjc", alias = "pkwiu")]
    pub classification_code: Option<String>,
    #[serde(alias = "qty")]
    pub quantity: Option<Decimal>,
    #[serde(alias = "uom")]
    pub unit_of_measure: Option<String>,
    #[serde(alias = "unit_net")]
    pub unit_net_price: Option<Decimal>,
    #[serde(alias = "vat_rate")]
    pub vat_rate_percent: Option<Decimal>,
    pub net: Option<Decimal>,
    pub vat: Option<Decimal>,
    pub gross: Option<Decimal>,
}

/// Created invoice plus the URL where it can be reviewed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntakeReceipt {
    pub invoice: Invoice,
    pub edit_url: String,
}

/// Check the shared secret presented by the caller.
///
/// # Errors
///
/// - [`IntakeError::ServiceUnavailable`] when no secret is configured,
/// - [`IntakeError::Unauthorized`] when `provided` is missing or wrong.
pub fn authorize(settings: &Settings, provided: Option<&str>) -> Result<(), IntakeError> {
    let expected = settings
        .automation_secret
        .as_ref()
        .map(|s| s.expose_secret().as_bytes())
        .filter(|s| !s.is_empty())
        .ok_or(IntakeError::ServiceUnavailable)?;
    let provided = provided.ok_or(IntakeError::Unauthorized)?.as_bytes();

    if expected.len() == provided.len() && bool::from(expected.ct_eq(provided)) {
        Ok(())
    } else {
        warn!("automation request rejected: bad secret");
        Err(IntakeError::Unauthorized)
    }
}

/// Accept `url` only if its host is an allowed domain or a subdomain of one.
pub fn check_webhook_url(url: &str, allowed_domains: &[String]) -> Result<(), IntakeError> {
    let parsed =
        reqwest::Url::parse(url).map_err(|e| IntakeError::InvalidWebhookUrl(e.to_string()))?;
    let host = parsed
        .host_str()
        .ok_or_else(|| IntakeError::InvalidWebhookUrl(url.to_string()))?
        .to_ascii_lowercase();

    let allowed = allowed_domains.iter().any(|domain| {
        let domain = domain.trim().to_ascii_lowercase();
        !domain.is_empty()
            && (host == domain
                || host
                    .strip_suffix(domain.as_str())
                    .is_some_and(|rest| rest.ends_with('.')))
    });

    if allowed {
        Ok(())
    } else {
        Err(IntakeError::WebhookDomainNotAllowed(host))
    }
}

/// Fill the gaps of `request` and produce a draft dated `now`.
pub fn build_draft(request: &AutomationRequest, settings: &Settings, now: DateTime<Utc>) -> InvoiceDraft {
    let seller_defaults = settings.default_seller();
    let seller = merge_party(request.seller.as_ref(), &seller_defaults);
    let buyer = merge_party(
        request.buyer.as_ref(),
        &Party {
            name: DEFAULT_BUYER_NAME.to_string(),
            tax_id: DEFAULT_BUYER_TAX_ID.to_string(),
            address_line_1: DEFAULT_BUYER_ADDRESS_1.to_string(),
            address_line_2: DEFAULT_BUYER_ADDRESS_2.to_string(),
            ..Party::default()
        },
    );

    let items = if request.items.is_empty() {
        vec![item_from_partial(&PartialItem::default())]
    } else {
        request.items.iter().map(item_from_partial).collect()
    };

    let claim_number = non_empty(&request.claim_number);
    let invoice_number = non_empty(&request.invoice_number)
        .or_else(|| claim_number.as_deref().map(invoice_number_from_claim))
        .unwrap_or_else(|| automation_invoice_number(now));

    let today = now.date_naive();
    InvoiceDraft {
        invoice_number,
        issue_date: today,
        delivery_date: today,
        issue_place: settings.issue_place.clone(),
        copy_type: DEFAULT_COPY_TYPE.to_string(),
        seller,
        buyer,
        items,
        payment_terms: non_empty(&request.payment_terms),
        payment_type: non_empty(&request.payment_type)
            .unwrap_or_else(|| DEFAULT_PAYMENT_TYPE.to_string()),
        document_notes: non_empty(&request.document_notes),
        claim_number,
        vehicle: non_empty(&request.vehicle),
        webhook_url: non_empty(&request.webhook_url),
    }
}

/// Authorized creation of a draft invoice from an automation request.
///
/// The secret is checked before the request is looked at; nothing is stored
/// unless it matches.
pub async fn create_from_automation<R, N>(
    store: &InvoiceStore<R, N>,
    settings: &Settings,
    provided_secret: Option<&str>,
    request: &AutomationRequest,
    host_url: &str,
    now: DateTime<Utc>,
) -> Result<IntakeReceipt, IntakeError>
where
    R: InvoiceRepository,
    N: CompletionNotifier,
{
    authorize(settings, provided_secret)?;

    if let Some(url) = non_empty(&request.webhook_url) {
        check_webhook_url(&url, &settings.webhook_allowed_domains())?;
    }

    let draft = build_draft(request, settings, now);
    let invoice = store.create_at(draft, now).await?;
    let edit_url = format!("{}/edit/{}", host_url.trim_end_matches('/'), invoice.id);

    info!(invoice_id = %invoice.id, %edit_url, "invoice created from automation");
    Ok(IntakeReceipt { invoice, edit_url })
}

/// Authorized completion of an invoice, firing its webhook.
pub async fn complete_from_automation<R, N>(
    store: &InvoiceStore<R, N>,
    settings: &Settings,
    provided_secret: Option<&str>,
    id: Uuid,
) -> Result<Invoice, IntakeError>
where
    R: InvoiceRepository,
    N: CompletionNotifier,
{
    authorize(settings, provided_secret)?;
    Ok(store.mark_completed(id).await?)
}

fn merge_party(partial: Option<&PartialParty>, defaults: &Party) -> Party {
    let empty = PartialParty::default();
    let partial = partial.unwrap_or(&empty);
    let pick = |value: &Option<String>, fallback: &str| {
        non_empty(value).unwrap_or_else(|| fallback.to_string())
    };
    let pick_opt = |value: &Option<String>, fallback: &Option<String>| {
        non_empty(value).or_else(|| fallback.clone())
    };

    Party {
        name: pick(&partial.name, &defaults.name),
        tax_id: pick(&partial.tax_id, &defaults.tax_id),
        address_line_1: pick(&partial.address_line_1, &defaults.address_line_1),
        address_line_2: pick(&partial.address_line_2, &defaults.address_line_2),
        phone: pick_opt(&partial.phone, &defaults.phone),
        bank_name: pick_opt(&partial.bank_name, &defaults.bank_name),
        bank_branch_address: pick_opt(&partial.bank_branch_address, &defaults.bank_branch_address),
        iban: pick_opt(&partial.iban, &defaults.iban),
    }
}

fn item_from_partial(partial: &PartialItem) -> InvoiceItem {
    InvoiceItem {
        name: non_empty(&partial.name).unwrap_or_else(|| DEFAULT_ITEM_NAME.to_string()),
        code: non_empty(&partial.code),
        classification_code: non_empty(&partial.classification_code),
        // a zero quantity is treated as unset
        quantity: partial
            .quantity
            .filter(|q| !q.is_zero())
            .unwrap_or(Decimal::ONE),
        unit_of_measure: non_empty(&partial.unit_of_measure)
            .unwrap_or_else(|| DEFAULT_ITEM_UNIT.to_string()),
        unit_net_price: partial.unit_net_price.unwrap_or(Decimal::ZERO),
        vat_rate_percent: partial.vat_rate_percent.unwrap_or(STANDARD_VAT_RATE),
        net: partial.net,
        vat: partial.vat,
        gross: partial.gross,
    }
}

fn non_empty(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

#[cfg(feature = "import")]
impl From<crate::calculation::CalculationImport> for AutomationRequest {
    fn from(import: crate::calculation::CalculationImport) -> Self {
        Self {
            invoice_number: import.invoice_number,
            items: import
                .items
                .into_iter()
                .map(|item| PartialItem {
                    name: Some(item.name),
                    code: item.code,
                    classification_code: item.classification_code,
                    quantity: Some(item.quantity),
                    unit_of_measure: Some(item.unit_of_measure),
                    unit_net_price: Some(item.unit_net_price),
                    vat_rate_percent: Some(item.vat_rate_percent),
                    net: item.net,
                    vat: item.vat,
                    gross: item.gross,
                })
                .collect(),
            document_notes: import.document_notes,
            claim_number: import.claim_number,
            vehicle: import.vehicle,
            ..Self::default()
        }
    }
}
