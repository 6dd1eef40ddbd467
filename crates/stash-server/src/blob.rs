//! Object-storage client seam.
//!
//! The S3 implementation talks to a real bucket; the in-memory implementation
//! backs demo mode and tests, including a switch that simulates backend
//! delete failures so the best-effort delete policy can be exercised.

pub mod memory;
pub mod s3;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Blob store error type.
#[derive(Debug, thiserror::Error)]
pub enum BlobError {
    #[error("Upload failed: {0}")]
    Upload(String),

    #[error("Cannot list files: {0}")]
    List(String),

    #[error("Delete failed: {0}")]
    Delete(String),

    #[error("Cannot sign URL: {0}")]
    Sign(String),

    #[error("No such object: {0}")]
    NotFound(String),
}

/// A stored object as reported by a listing.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredObject {
    pub key: String,
    pub last_modified: DateTime<Utc>,
    pub size: u64,
}

/// Outcome of a successful upload.
#[derive(Debug, Clone)]
pub struct PutOutcome {
    pub key: String,
    pub url: String,
}

/// Object-storage operations used by the upload and asset routes.
#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Stores one object under `key` with its declared content type.
    async fn put(
        &self,
        key: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<PutOutcome, BlobError>;

    /// All objects in the bucket.
    async fn list(&self) -> Result<Vec<StoredObject>, BlobError>;

    /// Removes one object. Deleting an absent key is not an error.
    async fn delete(&self, key: &str) -> Result<(), BlobError>;

    /// A time-limited pre-authorized download URL for `key`.
    async fn signed_url(&self, key: &str, ttl_secs: u64) -> Result<String, BlobError>;
}
