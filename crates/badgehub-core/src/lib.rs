//! # badgehub-core
//!
//! Core crate for BadgeHub. Contains configuration schemas, the unified
//! error system, and the traits implemented by other crates.
//!
//! This crate has **no** internal dependencies on other BadgeHub crates.

pub mod config;
pub mod error;
pub mod result;
pub mod traits;

pub use error::AppError;
pub use result::AppResult;
