//! Badge store: validation, image hashing, persistence, and queries.

pub mod image;
pub mod service;

pub use image::{ImageUpload, content_hash};
pub use service::{BadgeExport, BadgeService};
