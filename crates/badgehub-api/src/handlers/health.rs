//! Health check handler.

use axum::Json;

use crate::dto::HealthResponse;

/// GET /api/health
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        message: "Backend is running".to_string(),
    })
}
