//! Convenience result type alias for BadgeHub.

use crate::error::AppError;

/// A specialized `Result` type for BadgeHub operations.
pub type AppResult<T> = Result<T, AppError>;
