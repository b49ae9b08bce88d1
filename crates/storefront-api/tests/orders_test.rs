//! Integration tests for order fulfillment endpoints.

mod common;

use std::sync::Arc;

use axum::http::StatusCode;
use storefront_test_support::MemoryRecordStore;

async fn product_stock(store: &Arc<MemoryRecordStore>, id: i64) -> i64 {
    let app = common::build_test_app_with_store(store.clone());
    let (status, json) = common::get_json(app, "/api/products").await;
    assert_eq!(status, StatusCode::OK);
    json.as_array()
        .unwrap()
        .iter()
        .find(|p| p["id"] == id)
        .unwrap()["stock"]
        .as_i64()
        .unwrap()
}

#[tokio::test]
async fn test_order_commit_ignores_client_total_and_decrements_stock() {
    let store = Arc::new(MemoryRecordStore::new());
    let app = common::build_test_app_with_store(store.clone());
    let mug = common::create_product(app, "Enamel Mug", 900, 5).await;

    // The client lies about the total; the server recomputes it.
    let app = common::build_test_app_with_store(store.clone());
    let (status, json) = common::post_json(
        app,
        "/api/orders",
        &serde_json::json!({
            "userId": 7,
            "items": [{ "id": mug, "quantity": 3 }],
            "total": 1,
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["success"], true);
    assert_eq!(json["order"]["id"], 1);
    assert_eq!(json["order"]["total"], 2700);
    assert_eq!(json["order"]["status"], "pending");
    assert_eq!(json["order"]["items"][0]["id"], mug);

    assert_eq!(product_stock(&store, mug).await, 2);
}

#[tokio::test]
async fn test_over_quantity_order_is_rejected_without_side_effects() {
    let store = Arc::new(MemoryRecordStore::new());
    let app = common::build_test_app_with_store(store.clone());
    let mug = common::create_product(app, "Enamel Mug", 900, 5).await;

    let app = common::build_test_app_with_store(store.clone());
    let (status, json) = common::post_json(
        app,
        "/api/orders",
        &serde_json::json!({
            "userId": 7,
            "items": [{ "id": mug, "quantity": 10 }],
        }),
    )
    .await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(json["error"], "insufficient_stock");
    assert_eq!(product_stock(&store, mug).await, 5);

    let app = common::build_test_app_with_store(store);
    let (_, json) = common::get_json(app, "/api/orders").await;
    assert!(json.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_failed_line_rolls_back_earlier_reservations() {
    let store = Arc::new(MemoryRecordStore::new());
    let app = common::build_test_app_with_store(store.clone());
    let mug = common::create_product(app, "Enamel Mug", 900, 5).await;
    let app = common::build_test_app_with_store(store.clone());
    let tee = common::create_product(app, "Logo Tee", 1500, 1).await;

    let app = common::build_test_app_with_store(store.clone());
    let (status, _) = common::post_json(
        app,
        "/api/orders",
        &serde_json::json!({
            "userId": 7,
            "items": [
                { "id": mug, "quantity": 2 },
                { "id": tee, "quantity": 3 },
            ],
        }),
    )
    .await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(product_stock(&store, mug).await, 5);
    assert_eq!(product_stock(&store, tee).await, 1);
}

#[tokio::test]
async fn test_unknown_product_in_order_is_404() {
    let app = common::build_test_app();
    let (status, json) = common::post_json(
        app,
        "/api/orders",
        &serde_json::json!({
            "userId": 7,
            "items": [{ "id": 999, "quantity": 1 }],
        }),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["error"], "not_found");
}

#[tokio::test]
async fn test_list_newest_first_and_filter_by_user() {
    let store = Arc::new(MemoryRecordStore::new());
    let app = common::build_test_app_with_store(store.clone());
    let mug = common::create_product(app, "Enamel Mug", 900, 50).await;

    for user_id in [7, 8, 7] {
        let app = common::build_test_app_with_store(store.clone());
        let (status, _) = common::post_json(
            app,
            "/api/orders",
            &serde_json::json!({
                "userId": user_id,
                "items": [{ "id": mug, "quantity": 1 }],
            }),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
    }

    let app = common::build_test_app_with_store(store.clone());
    let (_, json) = common::get_json(app, "/api/orders").await;
    let ids: Vec<i64> = json
        .as_array()
        .unwrap()
        .iter()
        .map(|o| o["id"].as_i64().unwrap())
        .collect();
    assert_eq!(ids, vec![3, 2, 1]);

    let app = common::build_test_app_with_store(store);
    let (_, json) = common::get_json(app, "/api/orders/7").await;
    let ids: Vec<i64> = json
        .as_array()
        .unwrap()
        .iter()
        .map(|o| o["id"].as_i64().unwrap())
        .collect();
    assert_eq!(ids, vec![3, 1]);
}

#[tokio::test]
async fn test_status_update_round_trip_and_404() {
    let store = Arc::new(MemoryRecordStore::new());
    let app = common::build_test_app_with_store(store.clone());
    let mug = common::create_product(app, "Enamel Mug", 900, 5).await;

    let app = common::build_test_app_with_store(store.clone());
    let (status, _) = common::post_json(
        app,
        "/api/orders",
        &serde_json::json!({
            "userId": 7,
            "items": [{ "id": mug, "quantity": 1 }],
        }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let app = common::build_test_app_with_store(store.clone());
    let (status, json) =
        common::put_json(app, "/api/orders/1/status", &serde_json::json!({ "status": "completed" }))
            .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["success"], true);

    let app = common::build_test_app_with_store(store.clone());
    let (_, json) = common::get_json(app, "/api/orders").await;
    assert_eq!(json[0]["status"], "completed");

    let app = common::build_test_app_with_store(store);
    let (status, json) =
        common::put_json(app, "/api/orders/999/status", &serde_json::json!({ "status": "completed" }))
            .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["error"], "not_found");
}
