//! Stash server binary: wires config, store, and blob backends into the router.

use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::EnvFilter;

use stash_server::blob::memory::MemoryBlobStore;
use stash_server::blob::s3::S3BlobStore;
use stash_server::blob::BlobStore;
use stash_server::config::{BlobBackend, Config, StoreBackend};
use stash_server::routes::{create_router, AppState};
use stash_server::store::memory::MemoryStore;
use stash_server::store::mongo::MongoStore;
use stash_server::store::Store;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::from_env();

    let store: Arc<dyn Store> = match config.store_backend {
        StoreBackend::Mongo => {
            let mongo = MongoStore::connect(&config.mongodb_uri, &config.mongodb_database)
                .await
                .context("failed to connect to MongoDB")?;
            tracing::info!(database = %config.mongodb_database, "connected to MongoDB");
            Arc::new(mongo)
        }
        StoreBackend::Memory => {
            tracing::info!("demo mode: using in-memory store with sample data");
            Arc::new(MemoryStore::with_samples())
        }
    };

    let blobs: Arc<dyn BlobStore> = match config.blob_backend {
        BlobBackend::S3 => {
            tracing::info!(bucket = %config.bucket, "using S3 blob store");
            Arc::new(S3BlobStore::from_env(config.bucket.clone()).await)
        }
        BlobBackend::Memory => {
            tracing::info!("demo mode: using in-memory blob store");
            Arc::new(MemoryBlobStore::new())
        }
    };

    let app = create_router(AppState {
        store,
        blobs,
        signed_url_ttl_secs: config.signed_url_ttl_secs,
    });

    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    tracing::info!("server running on port {}", config.port);
    axum::serve(listener, app).await?;
    Ok(())
}
