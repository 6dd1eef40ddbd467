//! MongoDB-backed store.
//!
//! One process-wide driver client, collections `todos` and `assets` with
//! camelCase field names, single-document atomic updates. No transactions.

use std::collections::BTreeMap;

use async_trait::async_trait;
use bson::oid::ObjectId;
use bson::{doc, Document};
use chrono::{DateTime, Utc};
use futures_util::TryStreamExt;
use mongodb::options::ReturnDocument;
use mongodb::{Client, Collection};
use serde::{Deserialize, Serialize};

use super::{Store, StoreError};
use crate::models::{
    Asset, AssetFilter, AssetPage, AssetPatch, AssetStatus, FileInfo, NewAsset, NewTodo,
    PageParams, Todo, TodoPatch,
};

/// Store backed by one process-wide MongoDB client.
pub struct MongoStore {
    todos: Collection<TodoDoc>,
    assets: Collection<AssetDoc>,
}

impl MongoStore {
    /// Connects to MongoDB and binds the `todos` and `assets` collections.
    pub async fn connect(uri: &str, database: &str) -> Result<Self, StoreError> {
        let client = Client::with_uri_str(uri).await?;
        let db = client.database(database);
        Ok(Self {
            todos: db.collection("todos"),
            assets: db.collection("assets"),
        })
    }
}

/// A todo as stored in MongoDB.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TodoDoc {
    #[serde(rename = "_id")]
    id: ObjectId,
    text: String,
    completed: bool,
    #[serde(with = "bson::serde_helpers::chrono_datetime_as_bson_datetime")]
    created_at: DateTime<Utc>,
}

impl From<TodoDoc> for Todo {
    fn from(doc: TodoDoc) -> Self {
        Todo {
            id: doc.id.to_hex(),
            text: doc.text,
            completed: doc.completed,
            created_at: doc.created_at,
        }
    }
}

/// An asset as stored in MongoDB.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AssetDoc {
    #[serde(rename = "_id")]
    id: ObjectId,
    name: String,
    #[serde(default)]
    description: String,
    category: String,
    #[serde(default)]
    tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    file_info: Option<FileInfo>,
    #[serde(default)]
    metadata: BTreeMap<String, String>,
    status: AssetStatus,
    #[serde(with = "bson::serde_helpers::chrono_datetime_as_bson_datetime")]
    created_at: DateTime<Utc>,
    #[serde(with = "bson::serde_helpers::chrono_datetime_as_bson_datetime")]
    updated_at: DateTime<Utc>,
}

impl From<AssetDoc> for Asset {
    fn from(doc: AssetDoc) -> Self {
        Asset {
            id: doc.id.to_hex(),
            name: doc.name,
            description: doc.description,
            category: doc.category,
            tags: doc.tags,
            file_info: doc.file_info,
            metadata: doc.metadata,
            status: doc.status,
            created_at: doc.created_at,
            updated_at: doc.updated_at,
        }
    }
}

/// Parses a record id. Malformed ids read as absent records, so the caller
/// can 404 without a separate validation step.
fn parse_id(id: &str) -> Option<ObjectId> {
    ObjectId::parse_str(id).ok()
}

/// Builds the query document matching `AssetFilter::matches`.
fn asset_filter_doc(filter: &AssetFilter) -> Document {
    let mut query = doc! { "status": filter.status.as_str() };

    if let Some(ref category) = filter.category {
        query.insert("category", doc! { "$regex": category, "$options": "i" });
    }

    if !filter.tags.is_empty() {
        query.insert("tags", doc! { "$in": filter.tags.clone() });
    }

    if let Some(ref search) = filter.search {
        let pattern = doc! { "$regex": search, "$options": "i" };
        query.insert(
            "$or",
            vec![
                doc! { "name": pattern.clone() },
                doc! { "description": pattern.clone() },
                doc! { "tags": pattern },
            ],
        );
    }

    query
}

/// Builds the `$set` document for an asset patch. Always refreshes
/// `updatedAt`, so the document is never empty.
fn asset_set_doc(patch: AssetPatch) -> Document {
    let mut set = doc! { "updatedAt": bson::DateTime::now() };
    if let Some(name) = patch.name {
        set.insert("name", name);
    }
    if let Some(description) = patch.description {
        set.insert("description", description);
    }
    if let Some(category) = patch.category {
        set.insert("category", category);
    }
    if let Some(tags) = patch.tags {
        set.insert("tags", tags);
    }
    if let Some(status) = patch.status {
        set.insert("status", status.as_str());
    }
    if let Some(metadata) = patch.metadata {
        let mut md = Document::new();
        for (key, value) in metadata {
            md.insert(key, value);
        }
        set.insert("metadata", md);
    }
    set
}

#[async_trait]
impl Store for MongoStore {
    async fn list_todos(&self) -> Result<Vec<Todo>, StoreError> {
        let cursor = self
            .todos
            .find(doc! {})
            .sort(doc! { "createdAt": -1 })
            .await?;
        let docs: Vec<TodoDoc> = cursor.try_collect().await?;
        Ok(docs.into_iter().map(Todo::from).collect())
    }

    async fn get_todo(&self, id: &str) -> Result<Option<Todo>, StoreError> {
        let Some(oid) = parse_id(id) else {
            return Ok(None);
        };
        let doc = self.todos.find_one(doc! { "_id": oid }).await?;
        Ok(doc.map(Todo::from))
    }

    async fn insert_todo(&self, new: NewTodo) -> Result<Todo, StoreError> {
        let doc = TodoDoc {
            id: ObjectId::new(),
            text: new.text,
            completed: false,
            created_at: Utc::now(),
        };
        self.todos.insert_one(&doc).await?;
        Ok(doc.into())
    }

    async fn update_todo(&self, id: &str, patch: TodoPatch) -> Result<Option<Todo>, StoreError> {
        let Some(oid) = parse_id(id) else {
            return Ok(None);
        };

        let mut set = Document::new();
        if let Some(text) = patch.text {
            set.insert("text", text);
        }
        if let Some(completed) = patch.completed {
            set.insert("completed", completed);
        }
        if set.is_empty() {
            return self.get_todo(id).await;
        }

        let doc = self
            .todos
            .find_one_and_update(doc! { "_id": oid }, doc! { "$set": set })
            .return_document(ReturnDocument::After)
            .await?;
        Ok(doc.map(Todo::from))
    }

    async fn delete_todo(&self, id: &str) -> Result<Option<Todo>, StoreError> {
        let Some(oid) = parse_id(id) else {
            return Ok(None);
        };
        let doc = self.todos.find_one_and_delete(doc! { "_id": oid }).await?;
        Ok(doc.map(Todo::from))
    }

    async fn list_assets(
        &self,
        filter: &AssetFilter,
        page: PageParams,
    ) -> Result<AssetPage, StoreError> {
        let query = asset_filter_doc(filter);
        let total = self.assets.count_documents(query.clone()).await?;
        let cursor = self
            .assets
            .find(query)
            .sort(doc! { "createdAt": -1 })
            .skip(page.skip())
            .limit(page.limit as i64)
            .await?;
        let docs: Vec<AssetDoc> = cursor.try_collect().await?;

        Ok(AssetPage {
            items: docs.into_iter().map(Asset::from).collect(),
            total,
            page: page.page,
            limit: page.limit,
        })
    }

    async fn get_asset(&self, id: &str) -> Result<Option<Asset>, StoreError> {
        let Some(oid) = parse_id(id) else {
            return Ok(None);
        };
        let doc = self.assets.find_one(doc! { "_id": oid }).await?;
        Ok(doc.map(Asset::from))
    }

    async fn insert_asset(&self, new: NewAsset) -> Result<Asset, StoreError> {
        let now = Utc::now();
        let doc = AssetDoc {
            id: ObjectId::new(),
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
        self.assets.insert_one(&doc).await?;
        Ok(doc.into())
    }

    async fn update_asset(
        &self,
        id: &str,
        patch: AssetPatch,
    ) -> Result<Option<Asset>, StoreError> {
        let Some(oid) = parse_id(id) else {
            return Ok(None);
        };
        let doc = self
            .assets
            .find_one_and_update(doc! { "_id": oid }, doc! { "$set": asset_set_doc(patch) })
            .return_document(ReturnDocument::After)
            .await?;
        Ok(doc.map(Asset::from))
    }

    async fn delete_asset(&self, id: &str) -> Result<Option<Asset>, StoreError> {
        let Some(oid) = parse_id(id) else {
            return Ok(None);
        };
        let doc = self.assets.find_one_and_delete(doc! { "_id": oid }).await?;
        Ok(doc.map(Asset::from))
    }

    async fn asset_categories(&self) -> Result<Vec<String>, StoreError> {
        let values = self
            .assets
            .distinct("category", doc! { "status": "active" })
            .await?;
        let mut categories: Vec<String> = values
            .into_iter()
            .filter_map(|v| v.as_str().map(str::to_string))
            .collect();
        categories.sort();
        Ok(categories)
    }
}
