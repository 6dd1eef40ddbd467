//! Persistence client seam.
//!
//! One `Store` trait covers the two collections (`todos`, `assets`); the
//! MongoDB implementation wraps the process-wide driver client, and the
//! in-memory implementation backs demo mode and tests.

pub mod memory;
pub mod mongo;

use async_trait::async_trait;

use crate::models::{
    Asset, AssetFilter, AssetPage, AssetPatch, NewAsset, NewTodo, PageParams, Todo, TodoPatch,
};

/// Store error type.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] mongodb::error::Error),
}

/// Document-store operations used by the route handlers.
///
/// Update and delete return `Ok(None)` for unknown ids; the handler turns
/// that into a 404. Malformed ids read as absent records.
#[async_trait]
pub trait Store: Send + Sync {
    /// All todos, newest first.
    async fn list_todos(&self) -> Result<Vec<Todo>, StoreError>;
    async fn get_todo(&self, id: &str) -> Result<Option<Todo>, StoreError>;
    async fn insert_todo(&self, new: NewTodo) -> Result<Todo, StoreError>;
    async fn update_todo(&self, id: &str, patch: TodoPatch) -> Result<Option<Todo>, StoreError>;
    async fn delete_todo(&self, id: &str) -> Result<Option<Todo>, StoreError>;

    /// Filtered assets, newest first, one page at a time.
    async fn list_assets(
        &self,
        filter: &AssetFilter,
        page: PageParams,
    ) -> Result<AssetPage, StoreError>;
    async fn get_asset(&self, id: &str) -> Result<Option<Asset>, StoreError>;
    async fn insert_asset(&self, new: NewAsset) -> Result<Asset, StoreError>;
    async fn update_asset(&self, id: &str, patch: AssetPatch)
        -> Result<Option<Asset>, StoreError>;
    /// Hard removal. Soft deletion goes through `update_asset` with a status patch.
    async fn delete_asset(&self, id: &str) -> Result<Option<Asset>, StoreError>;
    /// Distinct categories across active assets, sorted.
    async fn asset_categories(&self) -> Result<Vec<String>, StoreError>;
}
