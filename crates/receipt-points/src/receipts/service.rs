use std::sync::Arc;

use tracing::{debug, info, warn};

use super::domain::{PurchaseRecord, ReceiptId};
use super::repository::{ReceiptRepository, RepositoryError, StoredReceipt};
use super::scoring::score;
use super::validation::{validate, ValidationFailure};

/// Composes validation, scoring and storage for one receipt at a time.
pub struct ReceiptService<R> {
    repository: Arc<R>,
}

impl<R> ReceiptService<R>
where
    R: ReceiptRepository + 'static,
{
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// Validate, score and store a receipt, returning the stored entry.
    pub fn process(&self, record: &PurchaseRecord) -> Result<StoredReceipt, ReceiptServiceError> {
        if let Err(failure) = validate(record).into_result() {
            debug!(reason = failure.code(), "receipt rejected");
            return Err(ReceiptServiceError::Invalid(failure));
        }

        let receipt = StoredReceipt {
            id: ReceiptId::generate(),
            points: score(record),
        };

        let stored = self.repository.insert(receipt).inspect_err(|err| {
            warn!(error = %err, "failed to store receipt");
        })?;
        info!(id = %stored.id, points = stored.points, "receipt processed");
        Ok(stored)
    }

    /// Points previously stored for `id`.
    pub fn points(&self, id: &ReceiptId) -> Result<u64, ReceiptServiceError> {
        let receipt = self
            .repository
            .fetch(id)?
            .ok_or(RepositoryError::NotFound)?;
        Ok(receipt.points)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ReceiptServiceError {
    #[error(transparent)]
    Invalid(#[from] ValidationFailure),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
