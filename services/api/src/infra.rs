use metrics_exporter_prometheus::PrometheusHandle;
use receipt_points::receipts::{ReceiptId, ReceiptRepository, RepositoryError, StoredReceipt};
use std::collections::HashMap;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Process-lifetime receipt store; contents are lost on restart.
#[derive(Default, Clone)]
pub(crate) struct InMemoryReceiptRepository {
    receipts: Arc<Mutex<HashMap<ReceiptId, StoredReceipt>>>,
}

impl InMemoryReceiptRepository {
    pub(crate) fn len(&self) -> usize {
        self.receipts.lock().map(|guard| guard.len()).unwrap_or(0)
    }
}

impl ReceiptRepository for InMemoryReceiptRepository {
    fn insert(&self, receipt: StoredReceipt) -> Result<StoredReceipt, RepositoryError> {
        let mut guard = self
            .receipts
            .lock()
            .map_err(|_| RepositoryError::Unavailable("receipt store poisoned".to_string()))?;
        if guard.contains_key(&receipt.id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(receipt.id.clone(), receipt.clone());
        Ok(receipt)
    }

    fn fetch(&self, id: &ReceiptId) -> Result<Option<StoredReceipt>, RepositoryError> {
        let guard = self
            .receipts
            .lock()
            .map_err(|_| RepositoryError::Unavailable("receipt store poisoned".to_string()))?;
        Ok(guard.get(id).cloned())
    }
}
