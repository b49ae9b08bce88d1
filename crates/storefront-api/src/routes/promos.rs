//! Routes for promo codes.

use axum::extract::{Path, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Serialize;
use tracing::instrument;

use storefront_core::promo::{PromoCode, PromoDraft};

use crate::error::ApiError;
use crate::state::AppState;

/// Response body for promo creation.
#[derive(Debug, Serialize)]
pub struct PromoResponse {
    /// Always `true` on success paths.
    pub success: bool,
    /// The registered promo code.
    pub promo: PromoCode,
}

/// Response body for a successful redemption.
#[derive(Debug, Serialize)]
pub struct RedeemResponse {
    /// Always `true` on success paths.
    pub success: bool,
    /// The discount attached to the redeemed code.
    pub discount: i64,
}

/// GET /api/promos
#[instrument(skip(state))]
async fn list_promos(State(state): State<AppState>) -> Result<Json<Vec<PromoCode>>, ApiError> {
    Ok(Json(state.promos.list().await?))
}

/// POST /api/promos
#[instrument(skip(state, draft))]
async fn create_promo(
    State(state): State<AppState>,
    Json(draft): Json<PromoDraft>,
) -> Result<Json<PromoResponse>, ApiError> {
    let promo = state.promos.create(draft, state.clock.as_ref()).await?;
    Ok(Json(PromoResponse { success: true, promo }))
}

/// POST /api/promos/{code}/apply
#[instrument(skip(state))]
async fn apply_promo(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> Result<Json<RedeemResponse>, ApiError> {
    let discount = state.promos.redeem(&code).await?;
    Ok(Json(RedeemResponse { success: true, discount }))
}

/// Returns the router for promo codes.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_promos).post(create_promo))
        .route("/{code}/apply", post(apply_promo))
}
