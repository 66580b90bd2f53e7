//! Handler for unmatched routes.

use badgehub_core::error::AppError;

use crate::error::ApiError;

/// Any path without a route.
pub async fn not_found() -> ApiError {
    AppError::not_found("Not found").into()
}
