//! Admin membership check.

use axum::extract::{Query, State};
use axum::routing::get;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::state::AppState;

/// Query parameters for GET /api/check-admin.
#[derive(Debug, Deserialize)]
pub struct CheckAdminQuery {
    /// The user id to check, as sent by the client. Malformed or absent
    /// values are treated as non-admin rather than rejected.
    pub tg_id: Option<String>,
}

/// Response body for the admin check.
#[derive(Debug, Serialize)]
pub struct CheckAdminResponse {
    /// Whether the id is in the configured admin set.
    #[serde(rename = "isAdmin")]
    pub is_admin: bool,
}

/// GET /api/check-admin?tg_id=N
#[instrument(skip(state))]
async fn check_admin(
    State(state): State<AppState>,
    Query(query): Query<CheckAdminQuery>,
) -> Json<CheckAdminResponse> {
    let is_admin = query
        .tg_id
        .as_deref()
        .and_then(|raw| raw.parse::<i64>().ok())
        .is_some_and(|id| state.is_admin(id));
    Json(CheckAdminResponse { is_admin })
}

/// Returns the router for the admin check.
pub fn router() -> Router<AppState> {
    Router::new().route("/api/check-admin", get(check_admin))
}
