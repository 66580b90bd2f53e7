//! Route definitions for the BadgeHub HTTP API.
//!
//! All routes are mounted under `/api`. The router receives `AppState` and
//! passes it to handlers via Axum's `State` extractor.

use axum::{
    Router,
    extract::DefaultBodyLimit,
    middleware as axum_middleware,
    routing::{get, post},
};

use crate::handlers;
use crate::middleware;
use crate::state::AppState;

/// Build the Axum router with all routes, the body limit, and request logging.
pub fn build_router(state: AppState) -> Router {
    let max_body = state.config.server.max_body_bytes;

    let api_routes = Router::new()
        .merge(health_routes())
        .merge(badge_routes())
        .merge(report_routes())
        .merge(remote_routes());

    Router::new()
        .nest("/api", api_routes)
        .fallback(handlers::fallback::not_found)
        .layer(DefaultBodyLimit::max(max_body))
        .layer(axum_middleware::from_fn(middleware::logging::request_logging))
        .with_state(state)
}

/// Liveness probe
fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(handlers::health::health))
}

/// Badge CRUD, image, and search
fn badge_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/badges",
            get(handlers::badge::list_badges).post(handlers::badge::upload_badge),
        )
        .route("/badges/search", post(handlers::badge::search_badges))
        .route(
            "/badges/{id}",
            get(handlers::badge::get_badge)
                .put(handlers::badge::update_badge)
                .delete(handlers::badge::delete_badge),
        )
        .route("/badges/{id}/image", get(handlers::badge::get_badge_image))
}

/// Statistics and export
fn report_routes() -> Router<AppState> {
    Router::new()
        .route("/stats", get(handlers::report::stats))
        .route("/export", get(handlers::report::export))
}

/// Remote fetch proxy
fn remote_routes() -> Router<AppState> {
    Router::new().route("/fetch-remote", post(handlers::remote::fetch_remote))
}
