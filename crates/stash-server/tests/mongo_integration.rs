//! MongoDB-backed store tests.
//!
//! Run with `cargo test -- --ignored` against a local MongoDB instance
//! (`MONGODB_URI` overrides the default connection string). Each run uses a
//! throwaway database name so tests never collide.

use stash_server::models::{
    AssetFilter, AssetPatch, AssetStatus, NewAsset, NewTodo, PageParams, TodoPatch,
};
use stash_server::store::mongo::MongoStore;
use stash_server::store::Store;

async fn connect() -> MongoStore {
    let uri = std::env::var("MONGODB_URI")
        .unwrap_or_else(|_| "mongodb://localhost:27017".to_string());
    let database = format!("stash_test_{}", uuid::Uuid::new_v4().simple());
    MongoStore::connect(&uri, &database)
        .await
        .expect("connect to MongoDB")
}

#[tokio::test]
#[ignore = "requires MongoDB"]
async fn test_todo_crud_roundtrip() {
    let store = connect().await;

    let created = store
        .insert_todo(NewTodo { text: "write tests".to_string() })
        .await
        .expect("insert");
    assert!(!created.completed);

    let fetched = store.get_todo(&created.id).await.expect("get");
    assert_eq!(fetched.as_ref().map(|t| t.text.as_str()), Some("write tests"));

    let updated = store
        .update_todo(&created.id, TodoPatch { text: None, completed: Some(true) })
        .await
        .expect("update")
        .expect("todo exists");
    assert!(updated.completed);

    let deleted = store.delete_todo(&created.id).await.expect("delete");
    assert!(deleted.is_some());
    assert!(store.get_todo(&created.id).await.expect("get").is_none());
}

#[tokio::test]
#[ignore = "requires MongoDB"]
async fn test_malformed_id_reads_as_absent() {
    let store = connect().await;
    assert!(store.get_todo("not-an-object-id").await.expect("get").is_none());
    assert!(store
        .delete_todo("not-an-object-id")
        .await
        .expect("delete")
        .is_none());
}

#[tokio::test]
#[ignore = "requires MongoDB"]
async fn test_asset_filtering_and_soft_delete() {
    let store = connect().await;

    let kept = store
        .insert_asset(NewAsset {
            name: "Launch Banner".to_string(),
            description: "hero image".to_string(),
            category: "Images".to_string(),
            tags: vec!["marketing".to_string()],
            file_info: None,
            metadata: Default::default(),
        })
        .await
        .expect("insert");
    let trashed = store
        .insert_asset(NewAsset {
            name: "Old Draft".to_string(),
            description: String::new(),
            category: "Docs".to_string(),
            tags: vec![],
            file_info: None,
            metadata: Default::default(),
        })
        .await
        .expect("insert");

    store
        .update_asset(
            &trashed.id,
            AssetPatch { status: Some(AssetStatus::Deleted), ..Default::default() },
        )
        .await
        .expect("update")
        .expect("asset exists");

    let active = store
        .list_assets(&AssetFilter::default(), PageParams::clamped(None, None))
        .await
        .expect("list");
    assert_eq!(active.total, 1);
    assert_eq!(active.items[0].id, kept.id);

    let searched = store
        .list_assets(
            &AssetFilter { search: Some("HERO".to_string()), ..Default::default() },
            PageParams::clamped(None, None),
        )
        .await
        .expect("list");
    assert_eq!(searched.total, 1);

    let categories = store.asset_categories().await.expect("categories");
    assert_eq!(categories, vec!["Images".to_string()]);
}
