//! S3-backed blob store.

use std::time::Duration;

use async_trait::async_trait;
use aws_sdk_s3::presigning::PresigningConfig;
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::Client;
use chrono::{DateTime, Utc};

use super::{BlobError, BlobStore, PutOutcome, StoredObject};

/// Blob store over one S3 bucket. Credentials come from the ambient AWS
/// environment (instance role or env vars), as in the original deployment.
pub struct S3BlobStore {
    client: Client,
    bucket: String,
}

impl S3BlobStore {
    /// Loads AWS configuration from the environment and binds the bucket.
    pub async fn from_env(bucket: impl Into<String>) -> Self {
        let config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
        Self {
            client: Client::new(&config),
            bucket: bucket.into(),
        }
    }

    fn object_url(&self, key: &str) -> String {
        format!("https://{}.s3.amazonaws.com/{}", self.bucket, key)
    }
}

#[async_trait]
impl BlobStore for S3BlobStore {
    async fn put(
        &self,
        key: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<PutOutcome, BlobError> {
        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .body(ByteStream::from(bytes))
            .content_type(content_type)
            .send()
            .await
            .map_err(|e| BlobError::Upload(e.to_string()))?;

        Ok(PutOutcome {
            key: key.to_string(),
            url: self.object_url(key),
        })
    }

    async fn list(&self) -> Result<Vec<StoredObject>, BlobError> {
        let response = self
            .client
            .list_objects_v2()
            .bucket(&self.bucket)
            .send()
            .await
            .map_err(|e| BlobError::List(e.to_string()))?;

        let objects = response
            .contents()
            .iter()
            .filter_map(|obj| {
                let key = obj.key()?.to_string();
                let last_modified = obj
                    .last_modified()
                    .and_then(|ts| DateTime::<Utc>::from_timestamp(ts.secs(), ts.subsec_nanos()))
                    .unwrap_or_else(Utc::now);
                let size = obj.size().unwrap_or(0).max(0) as u64;
                Some(StoredObject { key, last_modified, size })
            })
            .collect();

        Ok(objects)
    }

    async fn delete(&self, key: &str) -> Result<(), BlobError> {
        self.client
            .delete_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await
            .map_err(|e| BlobError::Delete(e.to_string()))?;
        Ok(())
    }

    async fn signed_url(&self, key: &str, ttl_secs: u64) -> Result<String, BlobError> {
        let presigning = PresigningConfig::expires_in(Duration::from_secs(ttl_secs))
            .map_err(|e| BlobError::Sign(e.to_string()))?;
        let request = self
            .client
            .get_object()
            .bucket(&self.bucket)
            .key(key)
            .presigned(presigning)
            .await
            .map_err(|e| BlobError::Sign(e.to_string()))?;
        Ok(request.uri().to_string())
    }
}
