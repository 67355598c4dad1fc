use serde::Serialize;

use super::domain::ReceiptId;

/// What the store keeps for a processed receipt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StoredReceipt {
    pub id: ReceiptId,
    pub points: u64,
}

/// Storage abstraction so the service can be exercised without a real backend.
pub trait ReceiptRepository: Send + Sync {
    fn insert(&self, receipt: StoredReceipt) -> Result<StoredReceipt, RepositoryError>;
    fn fetch(&self, id: &ReceiptId) -> Result<Option<StoredReceipt>, RepositoryError>;
}

#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("receipt already exists")]
    Conflict,
    #[error("receipt not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}
