//! Badge CRUD, search, statistics, and export.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use sqlx::types::Json;
use tracing::{debug, info};
use validator::{Validate, ValidationErrors};

use badgehub_core::error::AppError;
use badgehub_core::result::AppResult;
use badgehub_database::repositories::BadgeRepository;
use badgehub_entity::badge::{
    Badge, BadgePatch, BadgeStats, BadgeSummary, CreateBadge, DEFAULT_IMAGE_MIME_TYPE,
    SearchCriteria,
};

use super::image::{ImageUpload, content_hash};

const BADGE_NOT_FOUND: &str = "Badge not found";
const IMAGE_NOT_FOUND: &str = "Badge or image not found";

/// Snapshot of every stored badge.
#[derive(Debug, Clone)]
pub struct BadgeExport {
    /// When the snapshot was taken.
    pub exported_at: DateTime<Utc>,
    /// Every badge, image bytes included.
    pub badges: Vec<Badge>,
}

impl BadgeExport {
    /// Number of exported badges.
    pub fn total(&self) -> usize {
        self.badges.len()
    }
}

/// The only component that reads or writes stored badges.
#[derive(Debug, Clone)]
pub struct BadgeService {
    /// Badge repository.
    repo: Arc<BadgeRepository>,
}

impl BadgeService {
    /// Creates a new badge service.
    pub fn new(repo: Arc<BadgeRepository>) -> Self {
        Self { repo }
    }

    /// Stores a new badge with an optional image.
    ///
    /// An empty image part is treated as no image. The content hash is
    /// computed here and `uploaded_at` is set to now.
    pub async fn create(&self, input: CreateBadge, image: Option<ImageUpload>) -> AppResult<Badge> {
        input.validate().map_err(validation_error)?;
        let id = input
            .id
            .ok_or_else(|| AppError::validation("Missing badge id"))?;

        let image = image.filter(|img| !img.is_empty());
        let (image_data, image_hash, image_mime_type) = match image {
            Some(img) => (
                Some(img.data.to_vec()),
                Some(content_hash(&img.data)),
                Some(img.mime_type().to_owned()),
            ),
            None => (None, None, None),
        };

        let badge = Badge {
            id,
            version: input.version,
            badge_type: input.badge_type,
            badge_name: input.badge_name,
            description: input.description,
            issuer_name: input.issuer_name,
            issuer_url: input.issuer_url,
            issuer_email: input.issuer_email,
            credential_provider: input.credential_provider,
            issuance_date: input.issuance_date,
            expires_date: input.expires_date,
            recipient_identity: input.recipient_identity,
            raw_data: input.raw_data.map(Json),
            image_data,
            image_hash,
            image_mime_type,
            uploaded_at: Utc::now(),
        };

        let created = self.repo.create(&badge).await?;

        info!(
            badge_id = %created.id,
            has_image = created.has_image(),
            image_hash = created.image_hash.as_deref().unwrap_or(""),
            "Badge created"
        );

        Ok(created)
    }

    /// Gets one badge with its image bytes.
    pub async fn get(&self, id: &str) -> AppResult<Badge> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found(BADGE_NOT_FOUND))
    }

    /// Fails with not-found unless the badge is stored.
    pub async fn ensure_exists(&self, id: &str) -> AppResult<()> {
        if self.repo.exists(id).await? {
            Ok(())
        } else {
            Err(AppError::not_found(BADGE_NOT_FOUND))
        }
    }

    /// Lists the metadata of every badge.
    pub async fn list(&self) -> AppResult<Vec<BadgeSummary>> {
        let badges = self.repo.find_all().await?;
        debug!(count = badges.len(), "Listed badges");
        Ok(badges)
    }

    /// Gets the raw image bytes and the mime type to serve them with.
    pub async fn image(&self, id: &str) -> AppResult<(Vec<u8>, String)> {
        let (data, mime_type) = self
            .repo
            .find_image(id)
            .await?
            .ok_or_else(|| AppError::not_found(IMAGE_NOT_FOUND))?;

        let data = data
            .filter(|d| !d.is_empty())
            .ok_or_else(|| AppError::not_found(IMAGE_NOT_FOUND))?;
        let mime_type = mime_type
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| DEFAULT_IMAGE_MIME_TYPE.to_owned());

        Ok((data, mime_type))
    }

    /// Applies a partial update to the mutable fields of a badge.
    pub async fn update(&self, id: &str, patch: &BadgePatch) -> AppResult<Badge> {
        let updated = self
            .repo
            .update(id, patch)
            .await?
            .ok_or_else(|| AppError::not_found(BADGE_NOT_FOUND))?;

        info!(
            badge_id = %id,
            fields = patch.assignments().len(),
            "Badge updated"
        );

        Ok(updated)
    }

    /// Deletes a badge and its image.
    pub async fn delete(&self, id: &str) -> AppResult<()> {
        if !self.repo.delete(id).await? {
            return Err(AppError::not_found(BADGE_NOT_FOUND));
        }

        info!(badge_id = %id, "Badge deleted");
        Ok(())
    }

    /// Finds badges matching every given criterion.
    pub async fn search(&self, criteria: &SearchCriteria) -> AppResult<Vec<BadgeSummary>> {
        let badges = self.repo.search(criteria).await?;
        debug!(
            issuer = criteria.issuer(),
            provider = criteria.provider(),
            term = criteria.term(),
            count = badges.len(),
            "Searched badges"
        );
        Ok(badges)
    }

    /// Aggregate counts over all badges.
    pub async fn stats(&self) -> AppResult<BadgeStats> {
        self.repo.stats().await
    }

    /// Every badge with image bytes, stamped with the export time.
    pub async fn export(&self) -> AppResult<BadgeExport> {
        let badges = self.repo.find_all_with_images().await?;
        info!(count = badges.len(), "Exported badges");
        Ok(BadgeExport {
            exported_at: Utc::now(),
            badges,
        })
    }
}

/// First field message from a failed `validate()`.
fn validation_error(errors: ValidationErrors) -> AppError {
    let message = errors
        .field_errors()
        .into_values()
        .flat_map(|errs| errs.iter())
        .find_map(|e| e.message.as_ref().map(|m| m.to_string()))
        .unwrap_or_else(|| format!("Invalid badge data: {errors}"));
    AppError::validation(message)
}
