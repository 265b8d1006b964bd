use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::core::money::fixed_2dp;
use crate::core::{CalculatedInvoice, InvoiceDraft, InvoiceItem, InvoiceStatus, Party, compute_totals};

/// A stored invoice.
///
/// Items carry their computed `net`/`vat`/`gross`; the grand totals are
/// kept as 2-dp strings (`"1230.00"`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Invoice {
    pub id: Uuid,
    #[serde(flatten)]
    pub draft: InvoiceDraft,
    pub total_net: String,
    pub total_vat: String,
    pub total_gross: String,
    #[serde(default)]
    pub status: InvoiceStatus,
    /// Set once the completion webhook was acknowledged.
    #[serde(default)]
    pub webhook_completed: bool,
    pub created_at: DateTime<Utc>,
}

impl Invoice {
    pub(crate) fn new(id: Uuid, calculated: CalculatedInvoice, created_at: DateTime<Utc>) -> Self {
        let mut invoice = Self {
            id,
            draft: calculated.draft.clone(),
            total_net: String::new(),
            total_vat: String::new(),
            total_gross: String::new(),
            status: InvoiceStatus::Draft,
            webhook_completed: false,
            created_at,
        };
        invoice.apply_calculation(calculated);
        invoice
    }

    pub(crate) fn apply_calculation(&mut self, calculated: CalculatedInvoice) {
        self.total_net = fixed_2dp(calculated.totals.net);
        self.total_vat = fixed_2dp(calculated.totals.vat);
        self.total_gross = fixed_2dp(calculated.totals.gross);
        self.draft = calculated.draft;
    }

    /// Per-rate summary and totals of the stored document, for rendering.
    pub fn calculated(&self) -> CalculatedInvoice {
        compute_totals(&self.draft)
    }

    pub fn is_completed(&self) -> bool {
        self.status == InvoiceStatus::Completed
    }
}

/// Partial update; `None` leaves a field unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InvoicePatch {
    pub invoice_number: Option<String>,
    pub issue_date: Option<NaiveDate>,
    pub delivery_date: Option<NaiveDate>,
    pub issue_place: Option<String>,
    pub copy_type: Option<String>,
    pub seller: Option<Party>,
    pub buyer: Option<Party>,
    pub items: Option<Vec<InvoiceItem>>,
    pub payment_terms: Option<String>,
    pub payment_type: Option<String>,
    pub document_notes: Option<String>,
    pub claim_number: Option<String>,
    pub vehicle: Option<String>,
    pub webhook_url: Option<String>,
    pub status: Option<InvoiceStatus>,
}

impl InvoicePatch {
    /// Completion request.
    pub fn completed() -> Self {
        Self {
            status: Some(InvoiceStatus::Completed),
            ..Self::default()
        }
    }

    /// Whether any document field (not the status) is set.
    pub fn touches_document(&self) -> bool {
        self.invoice_number.is_some()
            || self.issue_date.is_some()
            || self.delivery_date.is_some()
            || self.issue_place.is_some()
            || self.copy_type.is_some()
            || self.seller.is_some()
            || self.buyer.is_some()
            || self.items.is_some()
            || self.payment_terms.is_some()
            || self.payment_type.is_some()
            || self.document_notes.is_some()
            || self.claim_number.is_some()
            || self.vehicle.is_some()
            || self.webhook_url.is_some()
    }

    /// Merge the document fields into `draft`.
    pub fn apply(&self, draft: &mut InvoiceDraft) {
        fn set<T: Clone>(target: &mut T, value: &Option<T>) {
            if let Some(value) = value {
                *target = value.clone();
            }
        }
        fn set_opt<T: Clone>(target: &mut Option<T>, value: &Option<T>) {
            if value.is_some() {
                *target = value.clone();
            }
        }

        set(&mut draft.invoice_number, &self.invoice_number);
        set(&mut draft.issue_date, &self.issue_date);
        set(&mut draft.delivery_date, &self.delivery_date);
        set(&mut draft.issue_place, &self.issue_place);
        set(&mut draft.copy_type, &self.copy_type);
        set(&mut draft.seller, &self.seller);
        set(&mut draft.buyer, &self.buyer);
        set(&mut draft.items, &self.items);
        set_opt(&mut draft.payment_terms, &self.payment_terms);
        set(&mut draft.payment_type, &self.payment_type);
        set_opt(&mut draft.document_notes, &self.document_notes);
        set_opt(&mut draft.claim_number, &self.claim_number);
        set_opt(&mut draft.vehicle, &self.vehicle);
        set_opt(&mut draft.webhook_url, &self.webhook_url);
    }
}
