//! Storefront backend API server entry point.

use std::error::Error;
use std::net::SocketAddr;
use std::sync::Arc;

use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use storefront_api::config::Config;
use storefront_api::routes;
use storefront_api::seed;
use storefront_api::state::AppState;
use storefront_core::clock::SystemClock;
use storefront_record_store::RedisRecordStore;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // Initialize tracing subscriber.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .json()
        .init();

    tracing::info!("Starting storefront API server");

    let config = Config::from_env()?;

    // Connect to the record store; unavailability is fatal at startup.
    let store = RedisRecordStore::connect(&config.redis_url).await?;
    tracing::info!("Connected to record store");

    let app_state = AppState::new(
        Arc::new(store),
        Arc::new(SystemClock),
        config.admin_ids.clone(),
    );

    seed::init_sample_data(&app_state).await?;

    // TODO: Replace CorsLayer::permissive() with restricted origins for production.
    let app = routes::api_router()
        .fallback_service(ServeDir::new(&config.static_dir))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(app_state);

    let addr: SocketAddr = format!("{}:{}", config.host, config.port)
        .parse()
        .map_err(|e| format!("invalid HOST:PORT combination: {e}"))?;
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(listener, app).await?;

    Ok(())
}
