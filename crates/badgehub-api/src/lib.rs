//! # badgehub-api
//!
//! HTTP API layer for BadgeHub built on Axum.
//!
//! Provides the REST endpoints, middleware (CORS, request logging, body
//! limit), extractors, DTOs, and error mapping.

pub mod app;
pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use app::{build_app, build_state};
pub use error::ApiError;
pub use state::AppState;
