//! Uploaded badge images and their content hash.

use bytes::Bytes;
use sha2::{Digest, Sha256};

use badgehub_entity::badge::DEFAULT_IMAGE_MIME_TYPE;

/// Lowercase hex SHA-256 of `data`.
pub fn content_hash(data: &[u8]) -> String {
    hex::encode(Sha256::digest(data))
}

/// An image part received alongside badge metadata.
#[derive(Debug, Clone)]
pub struct ImageUpload {
    /// Raw image bytes.
    pub data: Bytes,
    /// Declared content type of the part, if any.
    pub mime_type: Option<String>,
}

impl ImageUpload {
    /// Create an upload from bytes and an optional content type.
    pub fn new(data: impl Into<Bytes>, mime_type: Option<String>) -> Self {
        Self {
            data: data.into(),
            mime_type,
        }
    }

    /// Whether the part carried no bytes.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Declared content type, or `image/png` when none was sent.
    pub fn mime_type(&self) -> &str {
        self.mime_type
            .as_deref()
            .filter(|m| !m.is_empty())
            .unwrap_or(DEFAULT_IMAGE_MIME_TYPE)
    }
}
