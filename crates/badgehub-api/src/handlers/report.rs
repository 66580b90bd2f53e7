//! Statistics and export handlers.

use axum::Json;
use axum::extract::State;

use crate::dto::{ExportResponse, StatsResponse};
use crate::error::ApiError;
use crate::state::AppState;

/// GET /api/stats
pub async fn stats(State(state): State<AppState>) -> Result<Json<StatsResponse>, ApiError> {
    let stats = state.badge_service.stats().await?;
    Ok(Json(stats.into()))
}

/// GET /api/export
pub async fn export(State(state): State<AppState>) -> Result<Json<ExportResponse>, ApiError> {
    let export = state.badge_service.export().await?;
    Ok(Json(export.into()))
}
