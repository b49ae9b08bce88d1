//! Route for aggregate statistics.

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use tracing::instrument;

use storefront_core::stats::AggregateStats;
use storefront_ledger::stats;

use crate::error::ApiError;
use crate::state::AppState;

/// GET /api/stats
#[instrument(skip(state))]
async fn get_stats(State(state): State<AppState>) -> Result<Json<AggregateStats>, ApiError> {
    let stats = stats::get(state.store.as_ref(), state.clock.as_ref()).await?;
    Ok(Json(stats))
}

/// Returns the router for aggregate statistics.
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(get_stats))
}
