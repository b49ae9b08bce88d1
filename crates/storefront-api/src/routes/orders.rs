//! Routes for order fulfillment.

use axum::extract::{Path, State};
use axum::routing::{get, put};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use storefront_core::order::{Order, OrderDraft};

use crate::error::ApiError;
use crate::state::AppState;

/// Response body for a committed order.
#[derive(Debug, Serialize)]
pub struct OrderResponse {
    /// Always `true` on success paths.
    pub success: bool,
    /// The committed order snapshot.
    pub order: Order,
}

/// Request body for PUT /api/orders/{id}/status.
#[derive(Debug, Deserialize)]
pub struct StatusUpdateRequest {
    /// The new workflow status. Any value is accepted.
    pub status: String,
}

/// Response body for status updates.
#[derive(Debug, Serialize)]
pub struct StatusUpdateResponse {
    /// Always `true` on success paths.
    pub success: bool,
}

/// GET /api/orders
#[instrument(skip(state))]
async fn list_orders(State(state): State<AppState>) -> Result<Json<Vec<Order>>, ApiError> {
    Ok(Json(state.orders.list().await?))
}

/// POST /api/orders
#[instrument(skip(state, draft), fields(user_id = draft.user_id))]
async fn create_order(
    State(state): State<AppState>,
    Json(draft): Json<OrderDraft>,
) -> Result<Json<OrderResponse>, ApiError> {
    let order = state.orders.create(draft, state.clock.as_ref()).await?;
    Ok(Json(OrderResponse { success: true, order }))
}

/// GET /api/orders/{user_id}
#[instrument(skip(state))]
async fn orders_for_user(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
) -> Result<Json<Vec<Order>>, ApiError> {
    Ok(Json(state.orders.for_user(user_id).await?))
}

/// PUT /api/orders/{id}/status
#[instrument(skip(state, request))]
async fn update_status(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(request): Json<StatusUpdateRequest>,
) -> Result<Json<StatusUpdateResponse>, ApiError> {
    state
        .orders
        .update_status(id, &request.status, state.clock.as_ref())
        .await?;
    Ok(Json(StatusUpdateResponse { success: true }))
}

/// Returns the router for orders.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_orders).post(create_order))
        .route("/{id}", get(orders_for_user))
        .route("/{id}/status", put(update_status))
}
