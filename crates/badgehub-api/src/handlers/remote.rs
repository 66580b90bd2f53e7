//! Remote fetch proxy handler.

use axum::Json;
use axum::extract::State;

use crate::dto::FetchRemoteResponse;
use crate::error::ApiError;
use crate::extractors::OptionalJsonBody;
use crate::state::AppState;

/// POST /api/fetch-remote
pub async fn fetch_remote(
    State(state): State<AppState>,
    OptionalJsonBody(body): OptionalJsonBody<serde_json::Value>,
) -> Result<Json<FetchRemoteResponse>, ApiError> {
    let data = state.remote_service.fetch(&body).await?;
    Ok(Json(FetchRemoteResponse { data }))
}
