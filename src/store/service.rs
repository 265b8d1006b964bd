use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};
use uuid::Uuid;

use super::{Invoice, InvoicePatch, InvoiceRepository, StoreError};
use crate::core::{InvoiceDraft, InvoiceStatus, compute_totals, validate_draft};
use crate::webhook::{CompletionNotifier, WebhookError};

/// Invoice lifecycle on top of a repository and a completion notifier.
///
/// Every write validates the merged document and recomputes its totals
/// before it reaches the repository. The notifier runs only for the caller
/// whose write performed the `draft → completed` transition (or on
/// [`InvoiceStore::retry_webhook`]).
pub struct InvoiceStore<R, N> {
    repository: R,
    notifier: N,
}

impl<R, N> InvoiceStore<R, N>
where
    R: InvoiceRepository,
    N: CompletionNotifier,
{
    pub fn new(repository: R, notifier: N) -> Self {
        Self {
            repository,
            notifier,
        }
    }

    pub fn repository(&self) -> &R {
        &self.repository
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    /// Validate, compute and persist a new draft invoice.
    pub async fn create(&self, draft: InvoiceDraft) -> Result<Invoice, StoreError> {
        self.create_at(draft, Utc::now()).await
    }

    /// [`create`](Self::create) with an explicit creation time.
    pub async fn create_at(
        &self,
        draft: InvoiceDraft,
        created_at: DateTime<Utc>,
    ) -> Result<Invoice, StoreError> {
        ensure_valid(&draft)?;

        let invoice = Invoice::new(Uuid::new_v4(), compute_totals(&draft), created_at);
        self.repository.insert(invoice.clone()).await?;

        info!(
            invoice_id = %invoice.id,
            invoice_number = %invoice.draft.invoice_number,
            total_gross = %invoice.total_gross,
            "invoice created"
        );
        Ok(invoice)
    }

    pub async fn get(&self, id: Uuid) -> Result<Invoice, StoreError> {
        self.repository
            .get(id)
            .await?
            .ok_or(StoreError::NotFound(id))
    }

    /// All invoices, oldest first.
    pub async fn list(&self) -> Result<Vec<Invoice>, StoreError> {
        let mut invoices = self.repository.list().await?;
        invoices.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
        Ok(invoices)
    }

    /// Merge `patch`, validate, recompute and write.
    ///
    /// # Errors
    ///
    /// - [`StoreError::NotFound`] for an unknown id,
    /// - [`StoreError::InvalidTransition`] when reopening a completed invoice,
    /// - [`StoreError::Validation`] when the merged document is invalid.
    ///
    /// A failed completion webhook is not an error: the invoice stays
    /// `completed` with `webhook_completed == false`.
    pub async fn update(&self, id: Uuid, patch: InvoicePatch) -> Result<Invoice, StoreError> {
        let current = self.get(id).await?;
        let previous = current.status;
        let next = patch.status.unwrap_or(previous);

        if previous == InvoiceStatus::Completed && next == InvoiceStatus::Draft {
            return Err(StoreError::InvalidTransition {
                from: previous,
                to: next,
            });
        }

        let invoice = merge(current, &patch, next)?;

        if previous == InvoiceStatus::Draft && next == InvoiceStatus::Completed {
            if self.repository.replace_if_draft(invoice.clone()).await? {
                info!(invoice_id = %id, "invoice completed");
                return self.deliver_on_completion(invoice).await;
            }

            // Another caller completed it first and owns the webhook.
            debug!(invoice_id = %id, "invoice already completed");
            let current = self.get(id).await?;
            if !patch.touches_document() {
                return Ok(current);
            }
            let invoice = merge(current, &patch, InvoiceStatus::Completed)?;
            self.repository.replace(invoice.clone()).await?;
            return Ok(invoice);
        }

        self.repository.replace(invoice.clone()).await?;
        debug!(invoice_id = %id, status = %next, "invoice updated");
        Ok(invoice)
    }

    /// Move a draft to `completed`; a no-op for completed invoices.
    pub async fn mark_completed(&self, id: Uuid) -> Result<Invoice, StoreError> {
        self.update(id, InvoicePatch::completed()).await
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), StoreError> {
        if self.repository.remove(id).await? {
            info!(invoice_id = %id, "invoice deleted");
            Ok(())
        } else {
            Err(StoreError::NotFound(id))
        }
    }

    /// Re-send the completion webhook of a completed invoice that has not
    /// been acknowledged yet. Already delivered invoices are returned as is.
    pub async fn retry_webhook(&self, id: Uuid) -> Result<Invoice, StoreError> {
        let mut invoice = self.get(id).await?;
        if !invoice.is_completed() {
            return Err(StoreError::NotCompleted(id));
        }
        if invoice.webhook_completed {
            return Ok(invoice);
        }
        if !has_webhook_url(&invoice) {
            return Err(WebhookError::MissingUrl.into());
        }

        match self.notifier.invoice_completed(&invoice).await {
            Ok(()) => {
                invoice.webhook_completed = true;
                self.repository.replace(invoice.clone()).await?;
                info!(invoice_id = %id, "completion webhook retried");
                Ok(invoice)
            }
            Err(e) => {
                warn!(invoice_id = %id, error = %e, "completion webhook retry failed");
                Err(e.into())
            }
        }
    }

    async fn deliver_on_completion(&self, mut invoice: Invoice) -> Result<Invoice, StoreError> {
        if !has_webhook_url(&invoice) {
            return Ok(invoice);
        }

        match self.notifier.invoice_completed(&invoice).await {
            Ok(()) => {
                invoice.webhook_completed = true;
                self.repository.replace(invoice.clone()).await?;
            }
            Err(e) => {
                warn!(invoice_id = %invoice.id, error = %e, "completion webhook failed");
            }
        }
        Ok(invoice)
    }
}

/// Apply `patch` to `invoice`, revalidating and recomputing when it touches
/// the document.
fn merge(mut invoice: Invoice, patch: &InvoicePatch, status: InvoiceStatus) -> Result<Invoice, StoreError> {
    if patch.touches_document() {
        let mut draft = invoice.draft.clone();
        patch.apply(&mut draft);
        ensure_valid(&draft)?;
        invoice.apply_calculation(compute_totals(&draft));
    }
    invoice.status = status;
    Ok(invoice)
}

fn ensure_valid(draft: &InvoiceDraft) -> Result<(), StoreError> {
    let errors = validate_draft(draft);
    if errors.is_empty() {
        Ok(())
    } else {
        Err(StoreError::Validation(errors))
    }
}

fn has_webhook_url(invoice: &Invoice) -> bool {
    invoice
        .draft
        .webhook_url
        .as_deref()
        .is_some_and(|url| !url.trim().is_empty())
}
