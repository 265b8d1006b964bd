use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// Standard Polish VAT rate, in percent.
pub const STANDARD_VAT_RATE: Decimal = dec!(23);

/// Printed copy marker used when none is given.
pub const DEFAULT_COPY_TYPE: &str = "ORYGINAŁ";

/// Payment type used when none is given (bank transfer).
pub const DEFAULT_PAYMENT_TYPE: &str = "przelew";

/// An invoice document before it is persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvoiceDraft {
    /// Invoice number as printed on the document.
    pub invoice_number: String,
    /// Data wystawienia.
    pub issue_date: NaiveDate,
    /// Data dostawy / wykonania usługi.
    pub delivery_date: NaiveDate,
    /// Miejsce wystawienia.
    pub issue_place: String,
    /// Copy marker ("ORYGINAŁ", "KOPIA").
    #[serde(default = "default_copy_type")]
    pub copy_type: String,
    pub seller: Party,
    pub buyer: Party,
    /// Line items, in document order.
    pub items: Vec<InvoiceItem>,
    #[serde(default)]
    pub payment_terms: Option<String>,
    #[serde(default = "default_payment_type")]
    pub payment_type: String,
    #[serde(default)]
    pub document_notes: Option<String>,
    /// Insurance claim identifier carried over from a calculation import.
    #[serde(default)]
    pub claim_number: Option<String>,
    /// Vehicle description (make, model, plate).
    #[serde(default)]
    pub vehicle: Option<String>,
    /// Endpoint notified once the invoice is completed.
    #[serde(default)]
    pub webhook_url: Option<String>,
}

fn default_copy_type() -> String {
    DEFAULT_COPY_TYPE.to_string()
}

fn default_payment_type() -> String {
    DEFAULT_PAYMENT_TYPE.to_string()
}

/// Seller or buyer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Party {
    pub name: String,
    /// NIP.
    #[serde(alias = "nip")]
    pub tax_id: String,
    /// Street and number.
    pub address_line_1: String,
    /// Postal code and city.
    pub address_line_2: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bank_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bank_branch_address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iban: Option<String>,
}

/// Invoice line item.
///
/// `net`, `vat` and `gross` are optional overrides: when present they are
/// used as given instead of being derived from quantity, price and rate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvoiceItem {
    pub name: String,
    /// Seller's item code (part number).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    /// KJC classification code. Older documents call it `kjc` or `pkwiu`.
    #[serde(
        default,
        alias = "kjc",
        alias = "pkwiu",
        skip_serializing_if = "Option::is_none"
    )]
    pub classification_code: Option<String>,
    pub quantity: Decimal,
    /// Unit of measure ("szt", "h", "usł").
    pub unit_of_measure: String,
    pub unit_net_price: Decimal,
    pub vat_rate_percent: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub net: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vat: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gross: Option<Decimal>,
}

/// Rounded amounts of a single line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemAmounts {
    pub net: Decimal,
    pub vat: Decimal,
    pub gross: Decimal,
}

/// Aggregate of all lines sharing one VAT rate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VatSummaryRow {
    pub rate: Decimal,
    pub net: Decimal,
    pub vat: Decimal,
    pub gross: Decimal,
}

/// Grand totals of an invoice.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Totals {
    pub net: Decimal,
    pub vat: Decimal,
    pub gross: Decimal,
}

/// A draft with computed per-item amounts, VAT summary and totals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculatedInvoice {
    /// The input draft; every item carries its computed `net`/`vat`/`gross`.
    #[serde(flatten)]
    pub draft: InvoiceDraft,
    /// One row per VAT rate with positive net, ascending by rate.
    pub vat_summary: Vec<VatSummaryRow>,
    pub totals: Totals,
}

/// Workflow state of a persisted invoice.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InvoiceStatus {
    #[default]
    Draft,
    Completed,
}

impl InvoiceStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Completed => "completed",
        }
    }
}

impl std::fmt::Display for InvoiceStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
