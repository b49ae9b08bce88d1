//! Routes for users.

use axum::extract::{Path, State};
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;
use tracing::instrument;

use storefront_core::user::{User, UserDraft};

use crate::error::ApiError;
use crate::state::AppState;

/// A user as returned over the wire: the stored record plus the computed
/// admin flag, which is configuration-derived and never persisted.
#[derive(Debug, Serialize)]
pub struct UserView {
    /// The stored user record.
    #[serde(flatten)]
    pub user: User,
    /// Whether the id is in the configured admin set.
    #[serde(rename = "isAdmin")]
    pub is_admin: bool,
}

/// Response body for user updates.
#[derive(Debug, Serialize)]
pub struct UserResponse {
    /// Always `true` on success paths.
    pub success: bool,
    /// The updated user.
    pub user: UserView,
}

/// GET /api/users/{id} — creates the user on first access.
#[instrument(skip(state))]
async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<UserView>, ApiError> {
    let user = state.users.get_or_create(id, state.clock.as_ref()).await?;
    let is_admin = state.is_admin(id);
    Ok(Json(UserView { user, is_admin }))
}

/// PUT /api/users/{id}
#[instrument(skip(state, draft))]
async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(draft): Json<UserDraft>,
) -> Result<Json<UserResponse>, ApiError> {
    let user = state.users.update(id, draft, state.clock.as_ref()).await?;
    let is_admin = state.is_admin(id);
    Ok(Json(UserResponse {
        success: true,
        user: UserView { user, is_admin },
    }))
}

/// Returns the router for users.
pub fn router() -> Router<AppState> {
    Router::new().route("/{id}", get(get_user).put(update_user))
}
