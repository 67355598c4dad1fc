use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde_json::json;

use crate::error::AppError;

use super::domain::{PurchaseRecord, ReceiptId};
use super::repository::{ReceiptRepository, RepositoryError};
use super::service::{ReceiptService, ReceiptServiceError};

/// Router exposing receipt intake and points lookup.
pub fn receipt_router<R>(service: Arc<ReceiptService<R>>) -> Router
where
    R: ReceiptRepository + 'static,
{
    Router::new()
        .route("/", get(welcome_handler))
        .route("/receipts/process", post(process_handler::<R>))
        .route("/receipts/:id/points", get(points_handler::<R>))
        .with_state(service)
}

pub(crate) async fn welcome_handler() -> Json<&'static str> {
    Json("Welcome to our Receipt Processor!")
}

/// A `null` body reaches validation as an empty record; bodies that do not decode
/// are answered with the same JSON error shape as validation failures.
pub(crate) async fn process_handler<R>(
    State(service): State<Arc<ReceiptService<R>>>,
    payload: Result<Json<Option<PurchaseRecord>>, JsonRejection>,
) -> Response
where
    R: ReceiptRepository + 'static,
{
    let record = match payload {
        Ok(Json(record)) => record.unwrap_or_default(),
        Err(rejection) => return AppError::from(rejection).into_response(),
    };
    match service.process(&record) {
        Ok(receipt) => (StatusCode::OK, Json(json!({ "id": receipt.id }))).into_response(),
        Err(ReceiptServiceError::Invalid(failure)) => {
            let payload = json!({
                "error": failure.to_string(),
                "reason": failure.code(),
            });
            (StatusCode::BAD_REQUEST, Json(payload)).into_response()
        }
        Err(other) => {
            let payload = json!({
                "error": other.to_string(),
            });
            (StatusCode::INTERNAL_SERVER_ERROR, Json(payload)).into_response()
        }
    }
}

pub(crate) async fn points_handler<R>(
    State(service): State<Arc<ReceiptService<R>>>,
    Path(id): Path<String>,
) -> Response
where
    R: ReceiptRepository + 'static,
{
    match service.points(&ReceiptId(id)) {
        Ok(points) => (StatusCode::OK, Json(json!({ "points": points }))).into_response(),
        Err(ReceiptServiceError::Repository(RepositoryError::NotFound)) => {
            let payload = json!({
                "error": "Receipt not found",
            });
            (StatusCode::NOT_FOUND, Json(payload)).into_response()
        }
        Err(other) => {
            let payload = json!({
                "error": other.to_string(),
            });
            (StatusCode::INTERNAL_SERVER_ERROR, Json(payload)).into_response()
        }
    }
}
