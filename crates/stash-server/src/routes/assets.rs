//! Asset catalog endpoints.

use std::collections::BTreeMap;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::{json, Value};

use super::AppState;
use crate::error::AppError;
use crate::models::{
    Asset, AssetFilter, AssetPage, AssetPatch, AssetStatus, FileInfo, NewAsset, PageParams,
};
use crate::validate::{normalize_tags, optional_text, required_text, TagsField};

/// Creates the assets router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(list_assets).post(create_asset))
        .route("/categories", get(list_categories))
        .route("/{id}", axum::routing::put(update_asset).delete(delete_asset))
        .route("/{id}/download", get(download_asset))
        .with_state(state)
}

/// Query parameters for asset listing.
#[derive(Debug, Default, Deserialize)]
pub struct ListAssetsQuery {
    pub category: Option<String>,
    /// Comma-separated; any-match against asset tags.
    pub tags: Option<String>,
    pub search: Option<String>,
    pub status: Option<String>,
    pub page: Option<u64>,
    pub limit: Option<u64>,
}

/// Request body for creating an asset.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateAssetRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub tags: Option<TagsField>,
    pub file_info: Option<FileInfo>,
    pub metadata: Option<BTreeMap<String, String>>,
}

/// Request body for updating an asset. Only these allow-listed fields apply;
/// anything else in the body is ignored, so `id` and `createdAt` can never
/// be overwritten.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAssetRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub tags: Option<TagsField>,
    pub status: Option<String>,
    pub metadata: Option<BTreeMap<String, String>>,
}

/// Query parameters for asset deletion.
#[derive(Debug, Default, Deserialize)]
pub struct DeleteAssetQuery {
    pub permanent: Option<String>,
}

fn parse_status(value: &str) -> Result<AssetStatus, AppError> {
    AssetStatus::parse(value)
        .ok_or_else(|| AppError::BadRequest(format!("Unknown status: {}", value)))
}

/// GET /api/assets - Filtered assets, newest first, as a pagination envelope.
async fn list_assets(
    State(state): State<AppState>,
    Query(query): Query<ListAssetsQuery>,
) -> Result<Json<AssetPage>, AppError> {
    let status = match query.status.as_deref() {
        Some(value) => parse_status(value)?,
        None => AssetStatus::Active,
    };

    let filter = AssetFilter {
        category: query.category,
        tags: normalize_tags(query.tags.map(TagsField::Joined)),
        search: query.search,
        status,
    };
    let page = PageParams::clamped(query.page, query.limit);

    Ok(Json(state.store.list_assets(&filter, page).await?))
}

/// POST /api/assets - Create an asset; name and category are required.
async fn create_asset(
    State(state): State<AppState>,
    Json(req): Json<CreateAssetRequest>,
) -> Result<(StatusCode, Json<Asset>), AppError> {
    let name = required_text("Asset name", req.name.as_deref())?;
    let category = required_text("Category", req.category.as_deref())?;

    let new = NewAsset {
        name,
        description: optional_text(req.description.as_deref()),
        category,
        tags: normalize_tags(req.tags),
        file_info: req.file_info,
        metadata: req.metadata.unwrap_or_default(),
    };
    let asset = state.store.insert_asset(new).await?;
    Ok((StatusCode::CREATED, Json(asset)))
}

/// PUT /api/assets/{id} - Apply allow-listed fields.
async fn update_asset(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<UpdateAssetRequest>,
) -> Result<Json<Asset>, AppError> {
    let name = match req.name {
        Some(ref n) => Some(required_text("Asset name", Some(n))?),
        None => None,
    };
    let category = match req.category {
        Some(ref c) => Some(required_text("Category", Some(c))?),
        None => None,
    };
    let status = match req.status.as_deref() {
        Some(value) => Some(parse_status(value)?),
        None => None,
    };

    let patch = AssetPatch {
        name,
        description: req.description.map(|d| d.trim().to_string()),
        category,
        tags: req.tags.map(|t| normalize_tags(Some(t))),
        status,
        metadata: req.metadata,
    };

    let asset = state
        .store
        .update_asset(&id, patch)
        .await?
        .ok_or_else(|| AppError::NotFound("Asset not found".to_string()))?;
    Ok(Json(asset))
}

/// DELETE /api/assets/{id} - Soft delete by default; `permanent=true` removes
/// the record after a best-effort delete of the backing blob.
async fn delete_asset(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(query): Query<DeleteAssetQuery>,
) -> Result<Json<Value>, AppError> {
    if query.permanent.as_deref() == Some("true") {
        let existing = state
            .store
            .get_asset(&id)
            .await?
            .ok_or_else(|| AppError::NotFound("Asset not found".to_string()))?;

        // Blob first, record second. The two stores share no transaction, and
        // a failed blob delete never blocks record removal.
        if let Some(ref info) = existing.file_info {
            if let Err(e) = state.blobs.delete(&info.key).await {
                tracing::warn!(key = %info.key, "blob delete failed, removing record anyway: {}", e);
            }
        }

        state
            .store
            .delete_asset(&id)
            .await?
            .ok_or_else(|| AppError::NotFound("Asset not found".to_string()))?;
        Ok(Json(json!({ "message": "Asset permanently deleted" })))
    } else {
        let patch = AssetPatch {
            status: Some(AssetStatus::Deleted),
            ..Default::default()
        };
        let asset = state
            .store
            .update_asset(&id, patch)
            .await?
            .ok_or_else(|| AppError::NotFound("Asset not found".to_string()))?;
        Ok(Json(json!({ "message": "Asset moved to trash", "asset": asset })))
    }
}

/// GET /api/assets/categories - Distinct categories across active assets.
async fn list_categories(State(state): State<AppState>) -> Result<Json<Vec<String>>, AppError> {
    Ok(Json(state.store.asset_categories().await?))
}

/// GET /api/assets/{id}/download - Time-limited signed URL for the backing blob.
async fn download_asset(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Value>, AppError> {
    let asset = state
        .store
        .get_asset(&id)
        .await?
        .ok_or_else(|| AppError::NotFound("Asset not found".to_string()))?;
    let info = asset
        .file_info
        .ok_or_else(|| AppError::NotFound("Asset has no file attached".to_string()))?;

    let url = state
        .blobs
        .signed_url(&info.key, state.signed_url_ttl_secs)
        .await?;
    Ok(Json(json!({ "url": url })))
}
