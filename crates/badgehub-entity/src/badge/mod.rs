//! Badge domain entities.

pub mod model;
pub mod patch;
pub mod search;
pub mod stats;

pub use model::{Badge, BadgeSummary, CreateBadge};
pub use patch::BadgePatch;
pub use search::SearchCriteria;
pub use stats::BadgeStats;

/// Mime type assumed for images uploaded without a content type.
pub const DEFAULT_IMAGE_MIME_TYPE: &str = "image/png";
