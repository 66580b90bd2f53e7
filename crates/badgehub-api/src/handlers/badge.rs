//! Badge CRUD, upload, image, and search handlers.

use axum::Json;
use axum::extract::multipart::{MultipartError, MultipartRejection};
use axum::extract::{Multipart, Path, State};
use axum::http::{StatusCode, header};
use axum::response::IntoResponse;
use tracing::debug;

use badgehub_core::error::{AppError, ErrorKind};
use badgehub_entity::badge::{BadgePatch, CreateBadge, SearchCriteria};
use badgehub_service::ImageUpload;

use crate::dto::{BadgeResponse, MessageResponse};
use crate::error::ApiError;
use crate::extractors::{JsonBody, OptionalJsonBody};
use crate::state::AppState;

/// Multipart field carrying the badge metadata as JSON text.
const BADGE_DATA_FIELD: &str = "badgeData";
/// Multipart field carrying the optional image.
const FILE_FIELD: &str = "file";

/// GET /api/badges
pub async fn list_badges(
    State(state): State<AppState>,
) -> Result<Json<Vec<BadgeResponse>>, ApiError> {
    let badges = state.badge_service.list().await?;
    Ok(Json(badges.into_iter().map(BadgeResponse::from).collect()))
}

/// GET /api/badges/{id}
pub async fn get_badge(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<BadgeResponse>, ApiError> {
    let badge = state.badge_service.get(&id).await?;
    Ok(Json(BadgeResponse::full(badge)))
}

/// GET /api/badges/{id}/image
pub async fn get_badge_image(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let (data, mime_type) = state.badge_service.image(&id).await?;
    Ok(([(header::CONTENT_TYPE, mime_type)], data))
}

/// POST /api/badges (multipart: `badgeData` JSON plus an optional `file`)
pub async fn upload_badge(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<(StatusCode, Json<BadgeResponse>), ApiError> {
    let mut multipart =
        multipart.map_err(|e| AppError::validation(format!("Multipart error: {}", e.body_text())))?;

    let mut badge_data: Option<String> = None;
    let mut image: Option<ImageUpload> = None;

    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        let name = field.name().unwrap_or("").to_string();
        match name.as_str() {
            BADGE_DATA_FIELD => {
                badge_data = Some(field.text().await.map_err(multipart_error)?);
            }
            FILE_FIELD => {
                let file_name = field.file_name().map(String::from);
                let mime_type = field.content_type().map(String::from);
                let data = field.bytes().await.map_err(multipart_error)?;

                // A file input left blank still sends a part with an empty name.
                if file_name.as_deref().is_some_and(|n| !n.is_empty()) && !data.is_empty() {
                    image = Some(ImageUpload::new(data, mime_type));
                } else {
                    debug!("Ignoring empty file part");
                }
            }
            _ => {}
        }
    }

    let badge_data = badge_data.ok_or_else(|| AppError::validation("Missing badgeData"))?;
    let input = parse_badge_data(&badge_data)?;

    let badge = state.badge_service.create(input, image).await?;
    Ok((StatusCode::CREATED, Json(BadgeResponse::metadata(&badge))))
}

/// PUT /api/badges/{id}
///
/// An unknown id is reported as 404 even when the body is malformed.
pub async fn update_badge(
    State(state): State<AppState>,
    Path(id): Path<String>,
    patch: Result<JsonBody<BadgePatch>, ApiError>,
) -> Result<Json<BadgeResponse>, ApiError> {
    let patch = match patch {
        Ok(JsonBody(patch)) => patch,
        Err(err) if err.0.kind == ErrorKind::PayloadTooLarge => return Err(err),
        Err(err) => {
            state.badge_service.ensure_exists(&id).await?;
            return Err(err);
        }
    };

    let badge = state.badge_service.update(&id, &patch).await?;
    Ok(Json(BadgeResponse::metadata(&badge)))
}

/// DELETE /api/badges/{id}
pub async fn delete_badge(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    state.badge_service.delete(&id).await?;
    Ok(Json(MessageResponse::new("Badge deleted successfully")))
}

/// POST /api/badges/search
pub async fn search_badges(
    State(state): State<AppState>,
    OptionalJsonBody(criteria): OptionalJsonBody<SearchCriteria>,
) -> Result<Json<Vec<BadgeResponse>>, ApiError> {
    let badges = state.badge_service.search(&criteria).await?;
    Ok(Json(badges.into_iter().map(BadgeResponse::from).collect()))
}

/// `badgeData` must be a JSON object.
fn parse_badge_data(text: &str) -> Result<CreateBadge, AppError> {
    let value: serde_json::Value = serde_json::from_str(text)
        .map_err(|e| AppError::validation(format!("Invalid badgeData: {e}")))?;
    if !value.is_object() {
        return Err(AppError::validation("Invalid badgeData: expected a JSON object"));
    }
    serde_json::from_value(value).map_err(|e| AppError::validation(format!("Invalid badgeData: {e}")))
}

fn multipart_error(err: MultipartError) -> AppError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::payload_too_large(err.body_text())
    } else {
        AppError::validation(format!("Multipart error: {}", err.body_text()))
    }
}
