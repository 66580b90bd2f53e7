//! JSON body extractors that reject with the API error body.
//!
//! Both extractors only accept a JSON object at the top level. Arrays would
//! otherwise fill struct fields by position.

use axum::Json;
use axum::body::Bytes;
use axum::extract::{FromRequest, Request};
use axum::http::StatusCode;
use serde::de::DeserializeOwned;
use serde_json::Value;

use badgehub_core::error::AppError;
use badgehub_core::result::AppResult;

use crate::error::ApiError;

/// Message for a body that parses as JSON but is not an object.
pub const NOT_AN_OBJECT: &str = "Request body must be a JSON object";

/// Like [`axum::Json`], but any rejection becomes a 400 `{"error": ...}`.
#[derive(Debug, Clone)]
pub struct JsonBody<T>(pub T);

impl<S, T> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<Value>::from_request(req, state).await {
            Ok(Json(value)) => Ok(Self(from_object(value)?)),
            Err(rejection) if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE => {
                Err(AppError::payload_too_large(rejection.body_text()).into())
            }
            Err(rejection) => Err(AppError::validation(rejection.body_text()).into()),
        }
    }
}

/// A JSON body that may be empty or `null`, in which case `T::default()` is used.
///
/// The content type is not checked.
#[derive(Debug, Clone)]
pub struct OptionalJsonBody<T>(pub T);

impl<S, T> FromRequest<S> for OptionalJsonBody<T>
where
    T: DeserializeOwned + Default,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let body = Bytes::from_request(req, state).await.map_err(|rejection| {
            if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
                AppError::payload_too_large(rejection.body_text())
            } else {
                AppError::validation(rejection.body_text())
            }
        })?;

        if body.iter().all(u8::is_ascii_whitespace) {
            return Ok(Self(T::default()));
        }

        let value: Value = serde_json::from_slice(&body)
            .map_err(|e| AppError::validation(format!("Invalid JSON body: {e}")))?;
        if value.is_null() {
            return Ok(Self(T::default()));
        }

        Ok(Self(from_object(value)?))
    }
}

/// Deserialize `T` from a JSON object, rejecting every other JSON shape.
pub fn from_object<T: DeserializeOwned>(value: Value) -> AppResult<T> {
    if !value.is_object() {
        return Err(AppError::validation(NOT_AN_OBJECT));
    }
    serde_json::from_value(value).map_err(|e| AppError::validation(format!("Invalid JSON body: {e}")))
}
