//! Application builder: wires services into state and state into the router.

use std::sync::Arc;

use axum::Router;
use sqlx::SqlitePool;
use tower_http::trace::TraceLayer;
use tracing::info;

use badgehub_core::config::AppConfig;
use badgehub_core::result::AppResult;
use badgehub_database::repositories::BadgeRepository;
use badgehub_service::{BadgeService, HttpRemoteFetcher, RemoteFetchService};

use crate::middleware::cors::build_cors_layer;
use crate::router::build_router;
use crate::state::AppState;

/// Builds the complete Axum application with all routes and middleware.
pub fn build_app(state: AppState) -> Router {
    let cors = build_cors_layer(&state.config.server.cors);

    build_router(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

/// Builds repositories and services on top of a migrated pool.
pub fn build_state(config: AppConfig, pool: SqlitePool) -> AppResult<AppState> {
    let badge_repo = Arc::new(BadgeRepository::new(pool));
    let badge_service = Arc::new(BadgeService::new(badge_repo));

    let fetcher = Arc::new(HttpRemoteFetcher::new(&config.remote)?);
    let remote_service = Arc::new(RemoteFetchService::new(fetcher));

    info!(
        remote_timeout_ms = config.remote.timeout_ms,
        "Services initialized"
    );

    Ok(AppState::new(Arc::new(config), badge_service, remote_service))
}
