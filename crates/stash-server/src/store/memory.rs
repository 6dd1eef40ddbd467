//! In-memory store backing demo mode and tests.
//!
//! Everything lives in process-lifetime vectors behind `RwLock`s; nothing
//! survives a restart. Concurrent writes to one record are last-write-wins,
//! matching what the document store provides.

use std::collections::BTreeSet;

use async_trait::async_trait;
use chrono::{Duration, Utc};
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{Store, StoreError};
use crate::models::{
    Asset, AssetFilter, AssetPage, AssetPatch, AssetStatus, NewAsset, NewTodo, PageParams, Todo,
    TodoPatch,
};

/// Store over process-lifetime in-memory collections.
#[derive(Default)]
pub struct MemoryStore {
    todos: RwLock<Vec<Todo>>,
    assets: RwLock<Vec<Asset>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Demo-mode store seeded with the sample catalog.
    pub fn with_samples() -> Self {
        let now = Utc::now();
        let sample = |name: &str, description: &str, category: &str, tags: &[&str], age_days: i64| {
            let created = now - Duration::days(age_days);
            Asset {
                id: Uuid::new_v4().to_string(),
                name: name.to_string(),
                description: description.to_string(),
                category: category.to_string(),
                tags: tags.iter().map(|t| t.to_string()).collect(),
                file_info: None,
                metadata: Default::default(),
                status: AssetStatus::Active,
                created_at: created,
                updated_at: created,
            }
        };

        Self {
            todos: RwLock::new(Vec::new()),
            assets: RwLock::new(vec![
                sample(
                    "Sample Document",
                    "A sample document for demonstration",
                    "Documents",
                    &["sample", "demo", "document"],
                    5,
                ),
                sample(
                    "Project Logo",
                    "Company logo for the project",
                    "Images",
                    &["logo", "branding", "design"],
                    10,
                ),
                sample(
                    "User Manual",
                    "Complete user manual for the application",
                    "Documentation",
                    &["manual", "guide", "help"],
                    15,
                ),
            ]),
        }
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn list_todos(&self) -> Result<Vec<Todo>, StoreError> {
        let mut todos = self.todos.read().await.clone();
        todos.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(todos)
    }

    async fn get_todo(&self, id: &str) -> Result<Option<Todo>, StoreError> {
        Ok(self.todos.read().await.iter().find(|t| t.id == id).cloned())
    }

    async fn insert_todo(&self, new: NewTodo) -> Result<Todo, StoreError> {
        let todo = Todo {
            id: Uuid::new_v4().to_string(),
            text: new.text,
            completed: false,
            created_at: Utc::now(),
        };
        self.todos.write().await.push(todo.clone());
        Ok(todo)
    }

    async fn update_todo(&self, id: &str, patch: TodoPatch) -> Result<Option<Todo>, StoreError> {
        let mut todos = self.todos.write().await;
        let Some(todo) = todos.iter_mut().find(|t| t.id == id) else {
            return Ok(None);
        };
        if let Some(text) = patch.text {
            todo.text = text;
        }
        if let Some(completed) = patch.completed {
            todo.completed = completed;
        }
        Ok(Some(todo.clone()))
    }

    async fn delete_todo(&self, id: &str) -> Result<Option<Todo>, StoreError> {
        let mut todos = self.todos.write().await;
        let Some(index) = todos.iter().position(|t| t.id == id) else {
            return Ok(None);
        };
        Ok(Some(todos.remove(index)))
    }

    async fn list_assets(
        &self,
        filter: &AssetFilter,
        page: PageParams,
    ) -> Result<AssetPage, StoreError> {
        let mut matching: Vec<Asset> = self
            .assets
            .read()
            .await
            .iter()
            .filter(|a| filter.matches(a))
            .cloned()
            .collect();
        matching.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        let total = matching.len() as u64;
        let start = page.skip().min(total) as usize;
        let end = page.skip().saturating_add(page.limit).min(total) as usize;

        Ok(AssetPage {
            items: matching[start..end].to_vec(),
            total,
            page: page.page,
            limit: page.limit,
        })
    }

    async fn get_asset(&self, id: &str) -> Result<Option<Asset>, StoreError> {
        Ok(self.assets.read().await.iter().find(|a| a.id == id).cloned())
    }

    async fn insert_asset(&self, new: NewAsset) -> Result<Asset, StoreError> {
        let now = Utc::now();
        let asset = Asset {
            id: Uuid::new_v4().to_string(),
            name: new.name,
            description: new.description,
            category: new.category,
            tags: new.tags,
            file_info: new.file_info,
            metadata: new.metadata,
            status: AssetStatus::Active,
            created_at: now,
            updated_at: now,
        };
        self.assets.write().await.push(asset.clone());
        Ok(asset)
    }

    async fn update_asset(
        &self,
        id: &str,
        patch: AssetPatch,
    ) -> Result<Option<Asset>, StoreError> {
        let mut assets = self.assets.write().await;
        let Some(asset) = assets.iter_mut().find(|a| a.id == id) else {
            return Ok(None);
        };
        if let Some(name) = patch.name {
            asset.name = name;
        }
        if let Some(description) = patch.description {
            asset.description = description;
        }
        if let Some(category) = patch.category {
            asset.category = category;
        }
        if let Some(tags) = patch.tags {
            asset.tags = tags;
        }
        if let Some(status) = patch.status {
            asset.status = status;
        }
        if let Some(metadata) = patch.metadata {
            asset.metadata = metadata;
        }
        asset.updated_at = Utc::now();
        Ok(Some(asset.clone()))
    }

    async fn delete_asset(&self, id: &str) -> Result<Option<Asset>, StoreError> {
        let mut assets = self.assets.write().await;
        let Some(index) = assets.iter().position(|a| a.id == id) else {
            return Ok(None);
        };
        Ok(Some(assets.remove(index)))
    }

    async fn asset_categories(&self) -> Result<Vec<String>, StoreError> {
        let categories: BTreeSet<String> = self
            .assets
            .read()
            .await
            .iter()
            .filter(|a| a.status == AssetStatus::Active)
            .map(|a| a.category.clone())
            .collect();
        Ok(categories.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_todos_list_newest_first() {
        let store = MemoryStore::new();
        let first = store
            .insert_todo(NewTodo { text: "first".to_string() })
            .await
            .expect("insert");
        tokio::time::sleep(std::time::Duration::from_millis(2)).await;
        let second = store
            .insert_todo(NewTodo { text: "second".to_string() })
            .await
            .expect("insert");

        let todos = store.list_todos().await.expect("list");
        assert_eq!(todos[0].id, second.id);
        assert_eq!(todos[1].id, first.id);
    }

    #[tokio::test]
    async fn test_todo_update_and_delete() {
        let store = MemoryStore::new();
        let todo = store
            .insert_todo(NewTodo { text: "task".to_string() })
            .await
            .expect("insert");

        let updated = store
            .update_todo(&todo.id, TodoPatch { completed: Some(true), text: None })
            .await
            .expect("update")
            .expect("exists");
        assert!(updated.completed);
        assert_eq!(updated.text, "task");

        assert!(store.delete_todo(&todo.id).await.expect("delete").is_some());
        // Second delete of the same id finds nothing.
        assert!(store.delete_todo(&todo.id).await.expect("delete").is_none());
    }

    #[tokio::test]
    async fn test_unknown_ids_read_as_absent() {
        let store = MemoryStore::new();
        assert!(store.get_todo("missing").await.expect("get").is_none());
        assert!(store
            .update_asset("missing", AssetPatch::default())
            .await
            .expect("update")
            .is_none());
    }

    #[tokio::test]
    async fn test_asset_pagination_envelope() {
        let store = MemoryStore::new();
        for i in 0..5 {
            store
                .insert_asset(NewAsset {
                    name: format!("asset-{}", i),
                    category: "Misc".to_string(),
                    ..Default::default()
                })
                .await
                .expect("insert");
        }

        let page = store
            .list_assets(&AssetFilter::default(), PageParams { page: 2, limit: 2 })
            .await
            .expect("list");
        assert_eq!(page.total, 5);
        assert_eq!(page.items.len(), 2);
        assert_eq!(page.page, 2);
        assert_eq!(page.limit, 2);

        // Pages past the end are empty, not an error.
        let page = store
            .list_assets(&AssetFilter::default(), PageParams { page: 9, limit: 2 })
            .await
            .expect("list");
        assert!(page.items.is_empty());
        assert_eq!(page.total, 5);
    }

    #[tokio::test]
    async fn test_soft_deleted_assets_leave_default_listing() {
        let store = MemoryStore::new();
        let asset = store
            .insert_asset(NewAsset {
                name: "doomed".to_string(),
                category: "Misc".to_string(),
                ..Default::default()
            })
            .await
            .expect("insert");

        store
            .update_asset(
                &asset.id,
                AssetPatch { status: Some(AssetStatus::Deleted), ..Default::default() },
            )
            .await
            .expect("update")
            .expect("exists");

        let active = store
            .list_assets(&AssetFilter::default(), PageParams::clamped(None, None))
            .await
            .expect("list");
        assert!(active.items.is_empty());

        let trash = store
            .list_assets(
                &AssetFilter { status: AssetStatus::Deleted, ..Default::default() },
                PageParams::clamped(None, None),
            )
            .await
            .expect("list");
        assert_eq!(trash.items.len(), 1);
    }

    #[tokio::test]
    async fn test_categories_are_distinct_active_and_sorted() {
        let store = MemoryStore::with_samples();
        store
            .insert_asset(NewAsset {
                name: "dup".to_string(),
                category: "Images".to_string(),
                ..Default::default()
            })
            .await
            .expect("insert");

        let categories = store.asset_categories().await.expect("categories");
        assert_eq!(categories, vec!["Documentation", "Documents", "Images"]);
    }

    #[tokio::test]
    async fn test_update_refreshes_updated_at() {
        let store = MemoryStore::new();
        let asset = store
            .insert_asset(NewAsset {
                name: "thing".to_string(),
                category: "Misc".to_string(),
                ..Default::default()
            })
            .await
            .expect("insert");

        tokio::time::sleep(std::time::Duration::from_millis(2)).await;
        let updated = store
            .update_asset(
                &asset.id,
                AssetPatch { description: Some("now described".to_string()), ..Default::default() },
            )
            .await
            .expect("update")
            .expect("exists");
        assert!(updated.updated_at > updated.created_at);
    }
}
