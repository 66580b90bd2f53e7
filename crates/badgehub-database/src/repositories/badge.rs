//! Badge repository implementation.

use sqlx::{QueryBuilder, Sqlite, SqlitePool};

use badgehub_core::error::{AppError, ErrorKind};
use badgehub_core::result::AppResult;
use badgehub_entity::badge::{Badge, BadgePatch, BadgeStats, BadgeSummary, SearchCriteria};

/// Columns of the metadata view. The image blob is reduced to its length.
const SUMMARY_COLUMNS: &str = "id, version, type, badge_name, description, issuer_name, \
     issuer_url, issuer_email, credential_provider, issuance_date, expires_date, \
     recipient_identity, raw_data, COALESCE(length(image_data), 0) AS image_size, \
     image_hash, image_mime_type, uploaded_at";

const LIST_ORDER: &str = " ORDER BY uploaded_at ASC, id ASC";

/// Raw image bytes and declared mime type of a stored badge.
pub type StoredImage = (Option<Vec<u8>>, Option<String>);

/// Repository for badge CRUD and query operations.
#[derive(Debug, Clone)]
pub struct BadgeRepository {
    pool: SqlitePool,
}

impl BadgeRepository {
    /// Create a new badge repository.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert a new badge row and return it as stored.
    ///
    /// A duplicate id yields a [`ErrorKind::Conflict`] error and leaves the
    /// existing row untouched.
    pub async fn create(&self, badge: &Badge) -> AppResult<Badge> {
        sqlx::query_as::<_, Badge>(
            "INSERT INTO badges (id, version, type, badge_name, description, issuer_name, \
             issuer_url, issuer_email, credential_provider, issuance_date, expires_date, \
             recipient_identity, raw_data, image_data, image_hash, image_mime_type, uploaded_at) \
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?) RETURNING *",
        )
        .bind(&badge.id)
        .bind(&badge.version)
        .bind(&badge.badge_type)
        .bind(&badge.badge_name)
        .bind(&badge.description)
        .bind(&badge.issuer_name)
        .bind(&badge.issuer_url)
        .bind(&badge.issuer_email)
        .bind(&badge.credential_provider)
        .bind(&badge.issuance_date)
        .bind(&badge.expires_date)
        .bind(&badge.recipient_identity)
        .bind(&badge.raw_data)
        .bind(&badge.image_data)
        .bind(&badge.image_hash)
        .bind(&badge.image_mime_type)
        .bind(badge.uploaded_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_insert_error(e, &badge.id))
    }

    /// Find a badge by id, image bytes included.
    pub async fn find_by_id(&self, id: &str) -> AppResult<Option<Badge>> {
        sqlx::query_as::<_, Badge>("SELECT * FROM badges WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find badge", e))
    }

    /// Whether a badge with this id is stored.
    pub async fn exists(&self, id: &str) -> AppResult<bool> {
        sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM badges WHERE id = ?)")
            .bind(id)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find badge", e))
    }

    /// Load only the image columns of a badge.
    pub async fn find_image(&self, id: &str) -> AppResult<Option<StoredImage>> {
        sqlx::query_as::<_, StoredImage>(
            "SELECT image_data, image_mime_type FROM badges WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to load badge image", e))
    }

    /// List every badge without image bytes.
    pub async fn find_all(&self) -> AppResult<Vec<BadgeSummary>> {
        sqlx::query_as::<_, BadgeSummary>(&format!(
            "SELECT {SUMMARY_COLUMNS} FROM badges{LIST_ORDER}"
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list badges", e))
    }

    /// List every badge with image bytes.
    pub async fn find_all_with_images(&self) -> AppResult<Vec<Badge>> {
        sqlx::query_as::<_, Badge>(&format!("SELECT * FROM badges{LIST_ORDER}"))
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to export badges", e))
    }

    /// Apply a patch in a single statement and return the updated row.
    ///
    /// Returns `None` when no badge has this id. An empty patch just reads
    /// the row back.
    pub async fn update(&self, id: &str, patch: &BadgePatch) -> AppResult<Option<Badge>> {
        let assignments = patch.assignments();
        if assignments.is_empty() {
            return self.find_by_id(id).await;
        }

        let mut query = QueryBuilder::<Sqlite>::new("UPDATE badges SET ");
        let mut set = query.separated(", ");
        for (column, value) in assignments {
            set.push(column);
            set.push_unseparated(" = ");
            set.push_bind_unseparated(value.map(str::to_owned));
        }
        query
            .push(" WHERE id = ")
            .push_bind(id.to_owned())
            .push(" RETURNING *");

        query
            .build_query_as::<Badge>()
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update badge", e))
    }

    /// Delete a badge and its image. Returns `true` if a row was removed.
    pub async fn delete(&self, id: &str) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM badges WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to delete badge", e))?;

        Ok(result.rows_affected() > 0)
    }

    /// Filter badges by issuer, provider, and free-text term.
    pub async fn search(&self, criteria: &SearchCriteria) -> AppResult<Vec<BadgeSummary>> {
        let mut query =
            QueryBuilder::<Sqlite>::new(format!("SELECT {SUMMARY_COLUMNS} FROM badges WHERE 1 = 1"));

        if let Some(issuer) = criteria.issuer() {
            query
                .push(" AND (issuer_name = ")
                .push_bind(issuer.to_owned())
                .push(" OR issuer_url = ")
                .push_bind(issuer.to_owned())
                .push(")");
        }

        if let Some(provider) = criteria.provider() {
            query
                .push(" AND credential_provider = ")
                .push_bind(provider.to_owned());
        }

        // instr() keeps `%` and `_` in the term literal, unlike LIKE.
        if let Some(term) = criteria.term() {
            query.push(" AND (");
            for (i, column) in ["badge_name", "description", "issuer_name"]
                .into_iter()
                .enumerate()
            {
                if i > 0 {
                    query.push(" OR ");
                }
                query
                    .push(format!("instr(lower({column}), lower("))
                    .push_bind(term.to_owned())
                    .push(")) > 0");
            }
            query.push(")");
        }

        query.push(LIST_ORDER);

        query
            .build_query_as::<BadgeSummary>()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to search badges", e))
    }

    /// Aggregate counts over all badges.
    pub async fn stats(&self) -> AppResult<BadgeStats> {
        sqlx::query_as::<_, BadgeStats>(
            "SELECT COUNT(*) AS total_badges, \
             COUNT(DISTINCT issuer_name) AS distinct_issuer_names, \
             COUNT(DISTINCT issuer_url) AS distinct_issuer_urls, \
             COUNT(DISTINCT credential_provider) AS unique_providers, \
             COUNT(image_data) AS badges_with_images \
             FROM badges",
        )
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to compute badge stats", e))
    }
}

fn map_insert_error(err: sqlx::Error, id: &str) -> AppError {
    let duplicate = matches!(&err, sqlx::Error::Database(db) if db.is_unique_violation());
    if duplicate {
        AppError::with_source(
            ErrorKind::Conflict,
            format!("Badge '{id}' already exists"),
            err,
        )
    } else {
        AppError::with_source(
            ErrorKind::Database,
            format!("Failed to create badge: {err}"),
            err,
        )
    }
}
