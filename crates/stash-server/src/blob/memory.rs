//! In-memory blob store backing demo mode and tests.

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use super::{BlobError, BlobStore, PutOutcome, StoredObject};

struct StoredBlob {
    bytes: Vec<u8>,
    #[allow(dead_code)]
    content_type: String,
    last_modified: DateTime<Utc>,
}

/// Blob store over a process-lifetime in-memory map. URLs use a fake scheme
/// and point nowhere; demo mode never serves blob contents.
#[derive(Default)]
pub struct MemoryBlobStore {
    objects: RwLock<BTreeMap<String, StoredBlob>>,
    fail_deletes: bool,
}

impl MemoryBlobStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store whose deletes always fail, for exercising the best-effort
    /// blob-then-record deletion path.
    pub fn with_failing_deletes() -> Self {
        Self {
            objects: RwLock::new(BTreeMap::new()),
            fail_deletes: true,
        }
    }

    fn object_url(key: &str) -> String {
        format!("memory://stash/{}", key)
    }
}

#[async_trait]
impl BlobStore for MemoryBlobStore {
    async fn put(
        &self,
        key: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<PutOutcome, BlobError> {
        self.objects.write().await.insert(
            key.to_string(),
            StoredBlob {
                bytes,
                content_type: content_type.to_string(),
                last_modified: Utc::now(),
            },
        );
        Ok(PutOutcome {
            key: key.to_string(),
            url: Self::object_url(key),
        })
    }

    async fn list(&self) -> Result<Vec<StoredObject>, BlobError> {
        Ok(self
            .objects
            .read()
            .await
            .iter()
            .map(|(key, blob)| StoredObject {
                key: key.clone(),
                last_modified: blob.last_modified,
                size: blob.bytes.len() as u64,
            })
            .collect())
    }

    async fn delete(&self, key: &str) -> Result<(), BlobError> {
        if self.fail_deletes {
            return Err(BlobError::Delete("simulated backend failure".to_string()));
        }
        self.objects.write().await.remove(key);
        Ok(())
    }

    async fn signed_url(&self, key: &str, ttl_secs: u64) -> Result<String, BlobError> {
        if !self.objects.read().await.contains_key(key) {
            return Err(BlobError::NotFound(key.to_string()));
        }
        Ok(format!("{}?expires={}", Self::object_url(key), ttl_secs))
    }
}
