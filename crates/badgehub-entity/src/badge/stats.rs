//! Aggregate badge statistics.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Raw counts over the badge table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct BadgeStats {
    /// Number of stored badges.
    pub total_badges: i64,
    /// Distinct non-null issuer names.
    pub distinct_issuer_names: i64,
    /// Distinct non-null issuer URLs.
    pub distinct_issuer_urls: i64,
    /// Distinct non-null credential providers.
    pub unique_providers: i64,
    /// Badges that carry image data.
    pub badges_with_images: i64,
}

impl BadgeStats {
    /// Distinct issuer names plus distinct issuer URLs.
    ///
    /// This is a sum, not a union: one issuer known by both a name and a
    /// URL counts twice.
    pub fn unique_issuers(&self) -> i64 {
        self.distinct_issuer_names + self.distinct_issuer_urls
    }
}
