//! Response DTOs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use badgehub_entity::badge::{Badge, BadgeStats, BadgeSummary};
use badgehub_service::BadgeExport;

/// A badge on the wire.
///
/// Every metadata field is always present, `null` when unset. `imageData`
/// appears only in the full view, as lowercase hex.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BadgeResponse {
    pub id: String,
    pub version: Option<String>,
    #[serde(rename = "type")]
    pub badge_type: Option<String>,
    pub badge_name: Option<String>,
    pub description: Option<String>,
    pub issuer_name: Option<String>,
    pub issuer_url: Option<String>,
    pub issuer_email: Option<String>,
    pub credential_provider: Option<String>,
    pub issuance_date: Option<String>,
    pub expires_date: Option<String>,
    pub recipient_identity: Option<String>,
    pub raw_data: Option<serde_json::Value>,
    pub has_image: bool,
    pub image_hash: Option<String>,
    pub image_mime_type: Option<String>,
    pub uploaded_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_data: Option<String>,
}

impl BadgeResponse {
    /// Metadata view of a stored badge.
    pub fn metadata(badge: &Badge) -> Self {
        badge.summary().into()
    }

    /// Full view including the hex-encoded image.
    pub fn full(badge: Badge) -> Self {
        let image_data = badge
            .image_data
            .as_deref()
            .filter(|d| !d.is_empty())
            .map(hex::encode);
        Self {
            image_data,
            ..Self::metadata(&badge)
        }
    }
}

impl From<BadgeSummary> for BadgeResponse {
    fn from(b: BadgeSummary) -> Self {
        let has_image = b.has_image();
        Self {
            id: b.id,
            version: b.version,
            badge_type: b.badge_type,
            badge_name: b.badge_name,
            description: b.description,
            issuer_name: b.issuer_name,
            issuer_url: b.issuer_url,
            issuer_email: b.issuer_email,
            credential_provider: b.credential_provider,
            issuance_date: b.issuance_date,
            expires_date: b.expires_date,
            recipient_identity: b.recipient_identity,
            raw_data: b.raw_data.map(|json| json.0),
            has_image,
            image_hash: b.image_hash,
            image_mime_type: b.image_mime_type,
            uploaded_at: b.uploaded_at,
            image_data: None,
        }
    }
}

/// Aggregate statistics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsResponse {
    pub total_badges: i64,
    pub unique_issuers: i64,
    pub unique_providers: i64,
    pub badges_with_images: i64,
}

impl From<BadgeStats> for StatsResponse {
    fn from(stats: BadgeStats) -> Self {
        Self {
            total_badges: stats.total_badges,
            unique_issuers: stats.unique_issuers(),
            unique_providers: stats.unique_providers,
            badges_with_images: stats.badges_with_images,
        }
    }
}

/// Full dump of the registry.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportResponse {
    pub export_date: DateTime<Utc>,
    pub total_badges: usize,
    pub badges: Vec<BadgeResponse>,
}

impl From<BadgeExport> for ExportResponse {
    fn from(export: BadgeExport) -> Self {
        let total_badges = export.total();
        Self {
            export_date: export.exported_at,
            total_badges,
            badges: export.badges.into_iter().map(BadgeResponse::full).collect(),
        }
    }
}

/// Plain confirmation message.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub message: String,
}

/// Document fetched by the remote proxy.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetchRemoteResponse {
    pub data: serde_json::Value,
}
