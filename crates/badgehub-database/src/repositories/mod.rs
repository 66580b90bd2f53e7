//! Repository implementations for BadgeHub entities.

pub mod badge;

pub use badge::BadgeRepository;
