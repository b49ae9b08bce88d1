//! Route modules organized by resource.

pub mod admin;
pub mod health;
pub mod orders;
pub mod products;
pub mod promos;
pub mod stats;
pub mod users;

use axum::Router;

use crate::state::AppState;

/// Assembles the full API router. Layers and the static fallback are added
/// by the binary; tests drive this router directly.
pub fn api_router() -> Router<AppState> {
    Router::new()
        .merge(health::router())
        .merge(admin::router())
        .nest("/api/products", products::router())
        .nest("/api/orders", orders::router())
        .nest("/api/users", users::router())
        .nest("/api/promos", promos::router())
        .nest("/api/stats", stats::router())
}
