//! Integration tests for user endpoints.

mod common;

use std::sync::Arc;

use axum::http::StatusCode;
use storefront_test_support::MemoryRecordStore;

#[tokio::test]
async fn test_first_lookup_creates_user_with_defaults() {
    let store = Arc::new(MemoryRecordStore::new());
    let app = common::build_test_app_with_store(store.clone());
    let (status, json) = common::get_json(app, "/api/users/42").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["id"], 42);
    assert_eq!(json["username"], "user_42");
    assert_eq!(json["bonus"], 0);
    assert_eq!(json["referrals"], serde_json::json!([]));
    assert_eq!(json["referralCode"], "REF000042");
    assert_eq!(json["isAdmin"], false);

    // A second lookup returns the same record unchanged.
    let app = common::build_test_app_with_store(store);
    let (status, again) = common::get_json(app, "/api/users/42").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(again, json);
}

#[tokio::test]
async fn test_admin_flag_comes_from_configuration() {
    let app = common::build_test_app();
    let (status, json) =
        common::get_json(app, &format!("/api/users/{}", common::ADMIN_ID)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["isAdmin"], true);
}

#[tokio::test]
async fn test_update_user_round_trip() {
    let store = Arc::new(MemoryRecordStore::new());
    let app = common::build_test_app_with_store(store.clone());
    let (status, _) = common::get_json(app, "/api/users/42").await;
    assert_eq!(status, StatusCode::OK);

    let app = common::build_test_app_with_store(store.clone());
    let (status, json) = common::put_json(
        app,
        "/api/users/42",
        &serde_json::json!({
            "username": "alex",
            "bonus": 150,
            "referrals": [7, 9],
            "referralCode": "REF000042",
        }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["success"], true);
    assert_eq!(json["user"]["username"], "alex");
    assert_eq!(json["user"]["bonus"], 150);
    assert_eq!(json["user"]["referrals"], serde_json::json!([7, 9]));

    let app = common::build_test_app_with_store(store);
    let (_, json) = common::get_json(app, "/api/users/42").await;
    assert_eq!(json["username"], "alex");
    assert_eq!(json["bonus"], 150);
}

#[tokio::test]
async fn test_update_with_negative_bonus_is_rejected() {
    let app = common::build_test_app();
    let (status, json) = common::put_json(
        app,
        "/api/users/42",
        &serde_json::json!({ "username": "alex", "bonus": -1 }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "validation_error");
}
