//! Server configuration, read from the environment once at startup.

use std::env;

/// Which persistence backend to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    /// Process-lifetime in-memory collections (demo mode).
    Memory,
    /// MongoDB collections.
    Mongo,
}

/// Which object-storage backend to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlobBackend {
    /// In-memory objects with fake URLs (demo mode).
    Memory,
    /// An S3 bucket.
    S3,
}

/// Runtime configuration for the server binary.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub mongodb_uri: String,
    pub mongodb_database: String,
    pub bucket: String,
    pub store_backend: StoreBackend,
    pub blob_backend: BlobBackend,
    /// Lifetime of signed download URLs, in seconds.
    pub signed_url_ttl_secs: u64,
}

impl Config {
    /// Reads configuration from environment variables, with the defaults the
    /// original deployment used. Unset or unrecognized backend selectors fall
    /// back to the in-memory demo backends.
    pub fn from_env() -> Self {
        let store_backend = match env::var("STASH_STORE").as_deref() {
            Ok("mongodb") => StoreBackend::Mongo,
            _ => StoreBackend::Memory,
        };
        let blob_backend = match env::var("STASH_BLOBS").as_deref() {
            Ok("s3") => BlobBackend::S3,
            _ => BlobBackend::Memory,
        };

        Self {
            port: env_parsed("PORT", 5001),
            mongodb_uri: env::var("MONGODB_URI")
                .unwrap_or_else(|_| "mongodb://localhost:27017".to_string()),
            mongodb_database: env::var("MONGODB_DATABASE").unwrap_or_else(|_| "stash".to_string()),
            bucket: env::var("S3_BUCKET_NAME").unwrap_or_else(|_| "stash-assets".to_string()),
            store_backend,
            blob_backend,
            signed_url_ttl_secs: env_parsed("SIGNED_URL_TTL_SECS", 300),
        }
    }
}

fn env_parsed<T: std::str::FromStr>(name: &str, default: T) -> T {
    env::var(name)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
