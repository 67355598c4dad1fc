use super::common::*;
use axum::body::Body;
use axum::extract::State;
use axum::http::{header, Request, StatusCode};
use serde_json::json;
use std::sync::Arc;
use tower::ServiceExt;

use crate::receipts::router::{points_handler, process_handler};
use crate::receipts::ReceiptService;

fn post_json(uri: &str, body: Vec<u8>) -> Request<Body> {
    Request::post(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body))
        .expect("request builds")
}

#[tokio::test]
async fn process_then_fetch_points() {
    let (service, _) = build_service();
    let router = router_with_service(service);

    let response = router
        .clone()
        .oneshot(post_json(
            "/receipts/process",
            serde_json::to_vec(&corner_market_receipt()).expect("serializes"),
        ))
        .await
        .expect("router responds");
    let (status, body) = json_body(response).await;
    assert_eq!(status, StatusCode::OK);
    let id = body["id"].as_str().expect("id returned").to_string();

    let response = router
        .oneshot(
            Request::get(format!("/receipts/{id}/points"))
                .body(Body::empty())
                .expect("request builds"),
        )
        .await
        .expect("router responds");
    let (status, body) = json_body(response).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "points": 109 }));
}

#[tokio::test]
async fn invalid_receipt_returns_bad_request_with_reason() {
    let (service, repository) = build_service();
    let router = router_with_service(service);

    let mut record = target_receipt();
    record.retailer = Some("  ".to_string());
    let response = router
        .oneshot(post_json(
            "/receipts/process",
            serde_json::to_vec(&record).expect("serializes"),
        ))
        .await
        .expect("router responds");

    let (status, body) = json_body(response).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body,
        json!({ "error": "Blank Retailer", "reason": "blank_retailer" })
    );
    assert_eq!(repository.len(), 0);
}

#[tokio::test]
async fn null_and_empty_bodies_are_empty_payloads() {
    let (service, _) = build_service();
    let router = router_with_service(service);

    for body in ["null", "{}", r#"{"unrelated": true}"#] {
        let response = router
            .clone()
            .oneshot(post_json("/receipts/process", body.as_bytes().to_vec()))
            .await
            .expect("router responds");
        let (status, payload) = json_body(response).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{body}");
        assert_eq!(payload["error"], "Empty payload", "{body}");
    }
}

#[tokio::test]
async fn malformed_json_is_a_json_bad_request() {
    let (service, repository) = build_service();
    let router = router_with_service(service);

    let response = router
        .oneshot(post_json("/receipts/process", b"{ nope".to_vec()))
        .await
        .expect("router responds");

    assert_eq!(
        response.headers().get(header::CONTENT_TYPE).map(|value| value.as_bytes()),
        Some(&b"application/json"[..])
    );
    let (status, body) = json_body(response).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let message = body["error"].as_str().expect("error message");
    assert!(message.starts_with("invalid request body:"), "{message}");
    assert_eq!(repository.len(), 0);
}

#[tokio::test]
async fn numeric_price_is_rejected_as_bad_request() {
    let (service, repository) = build_service();
    let router = router_with_service(service);
    let body = json!({
        "retailer": "Target",
        "purchaseDate": "2022-01-01",
        "purchaseTime": "13:01",
        "items": [{ "shortDescription": "Mountain Dew 12PK", "price": 6.49 }],
        "total": "6.49"
    });

    let response = router
        .oneshot(post_json("/receipts/process", body.to_string().into_bytes()))
        .await
        .expect("router responds");

    let (status, payload) = json_body(response).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let message = payload["error"].as_str().expect("error message");
    assert!(message.contains("price"), "{message}");
    assert_eq!(repository.len(), 0);
}

#[tokio::test]
async fn unknown_receipt_is_not_found() {
    let (service, _) = build_service();

    let response = points_handler::<MemoryRepository>(
        State(service),
        axum::extract::Path("no-such-receipt".to_string()),
    )
    .await;

    let (status, body) = json_body(response).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "error": "Receipt not found" }));
}

#[tokio::test]
async fn store_failure_is_internal_error() {
    let service = Arc::new(ReceiptService::new(Arc::new(UnavailableRepository)));

    let response = process_handler::<UnavailableRepository>(
        State(service),
        Ok(axum::Json(Some(target_receipt()))),
    )
    .await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn root_welcomes_clients() {
    let (service, _) = build_service();
    let router = router_with_service(service);

    let response = router
        .oneshot(Request::get("/").body(Body::empty()).expect("request builds"))
        .await
        .expect("router responds");

    let (status, body) = json_body(response).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!("Welcome to our Receipt Processor!"));
}
