//! # badgehub-entity
//!
//! Domain entity models for BadgeHub. Row types derive `sqlx::FromRow`;
//! request-side types derive `Deserialize` with the lowerCamelCase field
//! names used on the wire.

pub mod badge;
