//! Routes for the product catalog.

use axum::extract::{Path, State};
use axum::routing::{delete, get};
use axum::{Json, Router};
use serde::Serialize;
use tracing::instrument;

use storefront_core::product::{Product, ProductDraft};

use crate::error::ApiError;
use crate::state::AppState;

/// Response body for product mutations.
#[derive(Debug, Serialize)]
pub struct ProductResponse {
    /// Always `true` on success paths.
    pub success: bool,
    /// The created or updated product.
    pub product: Product,
}

/// Response body for product deletion.
#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    /// Whether a product was actually removed.
    pub success: bool,
}

/// GET /api/products
#[instrument(skip(state))]
async fn list_products(State(state): State<AppState>) -> Result<Json<Vec<Product>>, ApiError> {
    Ok(Json(state.catalog.list().await?))
}

/// POST /api/products
#[instrument(skip(state, draft))]
async fn create_product(
    State(state): State<AppState>,
    Json(draft): Json<ProductDraft>,
) -> Result<Json<ProductResponse>, ApiError> {
    let product = state.catalog.create(draft, state.clock.as_ref()).await?;
    Ok(Json(ProductResponse { success: true, product }))
}

/// PUT /api/products/{id}
#[instrument(skip(state, draft))]
async fn update_product(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(draft): Json<ProductDraft>,
) -> Result<Json<ProductResponse>, ApiError> {
    let product = state.catalog.update(id, draft, state.clock.as_ref()).await?;
    Ok(Json(ProductResponse { success: true, product }))
}

/// DELETE /api/products/{id}
#[instrument(skip(state))]
async fn delete_product(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<DeleteResponse>, ApiError> {
    let success = state.catalog.delete(id).await?;
    Ok(Json(DeleteResponse { success }))
}

/// Returns the router for the product catalog.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_products).post(create_product))
        .route("/{id}", delete(delete_product).put(update_product))
}
