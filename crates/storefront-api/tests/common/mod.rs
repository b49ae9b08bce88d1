//! Shared test helpers for API integration tests.
#![allow(dead_code)]

use std::collections::HashSet;
use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use chrono::TimeZone;
use http_body_util::BodyExt;
use tower::ServiceExt;

use storefront_api::routes;
use storefront_api::state::AppState;
use storefront_test_support::{FixedClock, MemoryRecordStore};

/// The one privileged user id configured in the test app.
pub const ADMIN_ID: i64 = 1_286_638_668;

/// Build the full app router over a fresh in-memory record store.
pub fn build_test_app() -> Router {
    build_test_app_with_store(Arc::new(MemoryRecordStore::new()))
}

/// Build the full app router over a shared store, with a deterministic clock
/// and a fixed admin set. Uses the same route structure as `main.rs`.
pub fn build_test_app_with_store(store: Arc<MemoryRecordStore>) -> Router {
    let clock = FixedClock(
        chrono::Utc.with_ymd_and_hms(2026, 1, 15, 10, 0, 0).unwrap(),
    );
    let state = AppState::new(store, Arc::new(clock), HashSet::from([ADMIN_ID]));
    routes::api_router().with_state(state)
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, serde_json::Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let body_bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&body_bytes).unwrap();
    (status, json)
}

/// Send a GET request and return the response.
pub async fn get_json(app: Router, uri: &str) -> (StatusCode, serde_json::Value) {
    let request = Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

/// Send a POST request with a JSON body and return the response.
pub async fn post_json(
    app: Router,
    uri: &str,
    body: &serde_json::Value,
) -> (StatusCode, serde_json::Value) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_vec(body).unwrap()))
        .unwrap();
    send(app, request).await
}

/// Send a PUT request with a JSON body and return the response.
pub async fn put_json(
    app: Router,
    uri: &str,
    body: &serde_json::Value,
) -> (StatusCode, serde_json::Value) {
    let request = Request::builder()
        .method("PUT")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_vec(body).unwrap()))
        .unwrap();
    send(app, request).await
}

/// Send a DELETE request and return the response.
pub async fn delete_json(app: Router, uri: &str) -> (StatusCode, serde_json::Value) {
    let request = Request::builder()
        .method("DELETE")
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

/// Create a product through the API and return its id.
pub async fn create_product(app: Router, name: &str, price: i64, stock: i64) -> i64 {
    let (status, json) = post_json(
        app,
        "/api/products",
        &serde_json::json!({
            "name": name,
            "category": "apparel",
            "price": price,
            "stock": stock,
        }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    json["product"]["id"].as_i64().unwrap()
}
