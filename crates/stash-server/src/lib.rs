//! Stash Server - REST API for the todo list and asset catalog.
//!
//! Handlers reach persistence and object storage through dependency-injected
//! clients (`store::Store`, `blob::BlobStore`), so the in-memory backends can
//! stand in for MongoDB and S3 in demo mode and in tests.

pub mod blob;
pub mod config;
pub mod error;
pub mod models;
pub mod routes;
pub mod store;
pub mod validate;

pub use error::AppError;
pub use routes::{create_router, AppState};
