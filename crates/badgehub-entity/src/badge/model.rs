//! Badge entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use sqlx::types::Json;
use validator::Validate;

use super::DEFAULT_IMAGE_MIME_TYPE;

/// A stored badge, including its image bytes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Badge {
    /// Caller-assigned primary key.
    pub id: String,
    /// Credential spec version.
    pub version: Option<String>,
    /// Credential type tag.
    #[sqlx(rename = "type")]
    pub badge_type: Option<String>,
    /// Display name.
    pub badge_name: Option<String>,
    /// Free-form description.
    pub description: Option<String>,
    /// Issuer display name.
    pub issuer_name: Option<String>,
    /// Issuer URL.
    pub issuer_url: Option<String>,
    /// Issuer contact email.
    pub issuer_email: Option<String>,
    /// Platform that issued the credential.
    pub credential_provider: Option<String>,
    /// Opaque issuance date string.
    pub issuance_date: Option<String>,
    /// Opaque expiry date string.
    pub expires_date: Option<String>,
    /// Opaque recipient identity (e.g. a hashed email).
    pub recipient_identity: Option<String>,
    /// The original credential payload, stored verbatim.
    pub raw_data: Option<Json<serde_json::Value>>,
    /// Image bytes, never empty when present.
    pub image_data: Option<Vec<u8>>,
    /// Lowercase hex SHA-256 of `image_data`.
    pub image_hash: Option<String>,
    /// Mime type of `image_data`.
    pub image_mime_type: Option<String>,
    /// Set once at creation.
    pub uploaded_at: DateTime<Utc>,
}

impl Badge {
    /// Whether the badge carries non-empty image data.
    pub fn has_image(&self) -> bool {
        self.image_data.as_ref().is_some_and(|d| !d.is_empty())
    }

    /// Mime type to serve the image with.
    pub fn effective_mime_type(&self) -> &str {
        self.image_mime_type
            .as_deref()
            .unwrap_or(DEFAULT_IMAGE_MIME_TYPE)
    }

    /// Metadata view of this badge, without the image bytes.
    pub fn summary(&self) -> BadgeSummary {
        BadgeSummary {
            id: self.id.clone(),
            version: self.version.clone(),
            badge_type: self.badge_type.clone(),
            badge_name: self.badge_name.clone(),
            description: self.description.clone(),
            issuer_name: self.issuer_name.clone(),
            issuer_url: self.issuer_url.clone(),
            issuer_email: self.issuer_email.clone(),
            credential_provider: self.credential_provider.clone(),
            issuance_date: self.issuance_date.clone(),
            expires_date: self.expires_date.clone(),
            recipient_identity: self.recipient_identity.clone(),
            raw_data: self.raw_data.clone(),
            image_size: self.image_data.as_ref().map_or(0, |d| d.len() as i64),
            image_hash: self.image_hash.clone(),
            image_mime_type: self.image_mime_type.clone(),
            uploaded_at: self.uploaded_at,
        }
    }
}

/// Badge metadata as returned by list and search queries.
///
/// The image blob is never loaded for this view; only its size is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct BadgeSummary {
    /// Caller-assigned primary key.
    pub id: String,
    /// Credential spec version.
    pub version: Option<String>,
    /// Credential type tag.
    #[sqlx(rename = "type")]
    pub badge_type: Option<String>,
    /// Display name.
    pub badge_name: Option<String>,
    /// Free-form description.
    pub description: Option<String>,
    /// Issuer display name.
    pub issuer_name: Option<String>,
    /// Issuer URL.
    pub issuer_url: Option<String>,
    /// Issuer contact email.
    pub issuer_email: Option<String>,
    /// Platform that issued the credential.
    pub credential_provider: Option<String>,
    /// Opaque issuance date string.
    pub issuance_date: Option<String>,
    /// Opaque expiry date string.
    pub expires_date: Option<String>,
    /// Opaque recipient identity.
    pub recipient_identity: Option<String>,
    /// The original credential payload.
    pub raw_data: Option<Json<serde_json::Value>>,
    /// Image length in bytes, 0 when there is no image.
    pub image_size: i64,
    /// Lowercase hex SHA-256 of the image.
    pub image_hash: Option<String>,
    /// Mime type of the image.
    pub image_mime_type: Option<String>,
    /// Set once at creation.
    pub uploaded_at: DateTime<Utc>,
}

impl BadgeSummary {
    /// Whether the badge carries non-empty image data.
    pub fn has_image(&self) -> bool {
        self.image_size > 0
    }
}

/// Metadata supplied by the caller when uploading a badge.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateBadge {
    /// Primary key; required.
    #[validate(
        required(message = "Missing badge id"),
        length(min = 1, max = 50, message = "Badge id must be between 1 and 50 characters")
    )]
    pub id: Option<String>,
    /// Credential spec version.
    pub version: Option<String>,
    /// Credential type tag.
    #[serde(rename = "type")]
    pub badge_type: Option<String>,
    /// Display name.
    pub badge_name: Option<String>,
    /// Free-form description.
    pub description: Option<String>,
    /// Issuer display name.
    pub issuer_name: Option<String>,
    /// Issuer URL.
    pub issuer_url: Option<String>,
    /// Issuer contact email.
    pub issuer_email: Option<String>,
    /// Platform that issued the credential.
    pub credential_provider: Option<String>,
    /// Opaque issuance date string.
    pub issuance_date: Option<String>,
    /// Opaque expiry date string.
    pub expires_date: Option<String>,
    /// Opaque recipient identity.
    pub recipient_identity: Option<String>,
    /// The original credential payload, any JSON shape.
    pub raw_data: Option<serde_json::Value>,
}
