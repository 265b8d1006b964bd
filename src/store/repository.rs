use async_trait::async_trait;
use dashmap::DashMap;
use uuid::Uuid;

use super::{Invoice, StoreError};
use crate::core::InvoiceStatus;

/// Storage backend for invoices.
#[async_trait]
pub trait InvoiceRepository: Send + Sync {
    async fn get(&self, id: Uuid) -> Result<Option<Invoice>, StoreError>;
    async fn insert(&self, invoice: Invoice) -> Result<(), StoreError>;
    /// Overwrite an existing invoice; `NotFound` if it is gone.
    async fn replace(&self, invoice: Invoice) -> Result<(), StoreError>;
    /// Overwrite an existing invoice only while the stored copy is still a
    /// draft, as one atomic step. Returns whether the write happened.
    async fn replace_if_draft(&self, invoice: Invoice) -> Result<bool, StoreError>;
    /// Returns whether an invoice was removed.
    async fn remove(&self, id: Uuid) -> Result<bool, StoreError>;
    async fn list(&self) -> Result<Vec<Invoice>, StoreError>;
}

/// In-process repository.
#[derive(Debug, Default)]
pub struct MemoryRepository {
    invoices: DashMap<Uuid, Invoice>,
}

impl MemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.invoices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.invoices.is_empty()
    }
}

#[async_trait]
impl InvoiceRepository for MemoryRepository {
    async fn get(&self, id: Uuid) -> Result<Option<Invoice>, StoreError> {
        Ok(self.invoices.get(&id).map(|entry| entry.value().clone()))
    }

    async fn insert(&self, invoice: Invoice) -> Result<(), StoreError> {
        if self.invoices.contains_key(&invoice.id) {
            return Err(StoreError::Repository(format!(
                "invoice {} already exists",
                invoice.id
            )));
        }
        self.invoices.insert(invoice.id, invoice);
        Ok(())
    }

    async fn replace(&self, invoice: Invoice) -> Result<(), StoreError> {
        match self.invoices.get_mut(&invoice.id) {
            Some(mut entry) => {
                *entry = invoice;
                Ok(())
            }
            None => Err(StoreError::NotFound(invoice.id)),
        }
    }

    async fn replace_if_draft(&self, invoice: Invoice) -> Result<bool, StoreError> {
        match self.invoices.get_mut(&invoice.id) {
            Some(mut entry) if entry.status == InvoiceStatus::Draft => {
                *entry = invoice;
                Ok(true)
            }
            Some(_) => Ok(false),
            None => Err(StoreError::NotFound(invoice.id)),
        }
    }

    async fn remove(&self, id: Uuid) -> Result<bool, StoreError> {
        Ok(self.invoices.remove(&id).is_some())
    }

    async fn list(&self) -> Result<Vec<Invoice>, StoreError> {
        Ok(self
            .invoices
            .iter()
            .map(|entry| entry.value().clone())
            .collect())
    }
}
