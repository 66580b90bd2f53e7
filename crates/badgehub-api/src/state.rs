//! Application state shared across all handlers.

use std::sync::Arc;

use badgehub_core::config::AppConfig;
use badgehub_service::{BadgeService, RemoteFetchService};

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`. Handlers only see
/// services; the database pool stays behind [`BadgeService`].
#[derive(Debug, Clone)]
pub struct AppState {
    /// Application configuration
    pub config: Arc<AppConfig>,
    /// Badge store
    pub badge_service: Arc<BadgeService>,
    /// Remote fetch proxy
    pub remote_service: Arc<RemoteFetchService>,
}

impl AppState {
    /// Creates a new application state.
    pub fn new(
        config: Arc<AppConfig>,
        badge_service: Arc<BadgeService>,
        remote_service: Arc<RemoteFetchService>,
    ) -> Self {
        Self {
            config,
            badge_service,
            remote_service,
        }
    }
}
