use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::http::StatusCode;
use axum::response::Response;
use serde_json::Value;

use crate::receipts::domain::{LineItem, PurchaseRecord, ReceiptId};
use crate::receipts::repository::{ReceiptRepository, RepositoryError, StoredReceipt};
use crate::receipts::{receipt_router, ReceiptService};

pub(super) fn record(
    retailer: &str,
    purchase_date: &str,
    purchase_time: &str,
    items: &[(&str, &str)],
    total: &str,
) -> PurchaseRecord {
    PurchaseRecord {
        retailer: Some(retailer.to_string()),
        purchase_date: Some(purchase_date.to_string()),
        purchase_time: Some(purchase_time.to_string()),
        items: Some(
            items
                .iter()
                .map(|(description, price)| LineItem::new(*description, *price))
                .collect(),
        ),
        total: Some(total.to_string()),
    }
}

/// Reference receipt worth 28 points.
pub(super) fn target_receipt() -> PurchaseRecord {
    record(
        "Target",
        "2022-01-01",
        "13:01",
        &[
            ("Mountain Dew 12PK", "6.49"),
            ("Emils Cheese Pizza", "12.25"),
            ("Knorr Creamy Chicken", "1.26"),
            ("Doritos Nacho Cheese", "3.35"),
            ("   Klarbrunn 12-PK 12 FL OZ  ", "12.00"),
        ],
        "35.35",
    )
}

/// Reference receipt worth 109 points.
pub(super) fn corner_market_receipt() -> PurchaseRecord {
    record(
        "M&M Corner Market",
        "2022-03-20",
        "14:33",
        &[
            ("Gatorade", "2.25"),
            ("Gatorade", "2.25"),
            ("Gatorade", "2.25"),
            ("Gatorade", "2.25"),
        ],
        "9.00",
    )
}

pub(super) fn single_item_receipt() -> PurchaseRecord {
    record(
        "Target",
        "2022-01-01",
        "13:01",
        &[("Mountain Dew 12PK", "6.49")],
        "6.49",
    )
}

#[derive(Default, Clone)]
pub(super) struct MemoryRepository {
    receipts: Arc<Mutex<HashMap<ReceiptId, StoredReceipt>>>,
}

impl MemoryRepository {
    pub(super) fn len(&self) -> usize {
        self.receipts.lock().expect("repository mutex poisoned").len()
    }
}

impl ReceiptRepository for MemoryRepository {
    fn insert(&self, receipt: StoredReceipt) -> Result<StoredReceipt, RepositoryError> {
        let mut guard = self.receipts.lock().expect("repository mutex poisoned");
        if guard.contains_key(&receipt.id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(receipt.id.clone(), receipt.clone());
        Ok(receipt)
    }

    fn fetch(&self, id: &ReceiptId) -> Result<Option<StoredReceipt>, RepositoryError> {
        let guard = self.receipts.lock().expect("repository mutex poisoned");
        Ok(guard.get(id).cloned())
    }
}

pub(super) struct UnavailableRepository;

impl ReceiptRepository for UnavailableRepository {
    fn insert(&self, _receipt: StoredReceipt) -> Result<StoredReceipt, RepositoryError> {
        Err(RepositoryError::Unavailable("disk full".to_string()))
    }

    fn fetch(&self, _id: &ReceiptId) -> Result<Option<StoredReceipt>, RepositoryError> {
        Err(RepositoryError::Unavailable("disk full".to_string()))
    }
}

pub(super) fn build_service() -> (Arc<ReceiptService<MemoryRepository>>, MemoryRepository) {
    let repository = MemoryRepository::default();
    let service = Arc::new(ReceiptService::new(Arc::new(repository.clone())));
    (service, repository)
}

pub(super) fn router_with_service(service: Arc<ReceiptService<MemoryRepository>>) -> axum::Router {
    receipt_router(service)
}

pub(super) async fn json_body(response: Response) -> (StatusCode, Value) {
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body readable");
    let value = serde_json::from_slice(&bytes).expect("body is json");
    (status, value)
}
