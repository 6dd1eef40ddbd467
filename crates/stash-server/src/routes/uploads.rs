//! File upload and object-storage listing endpoints.

use axum::extract::{Multipart, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use chrono::Utc;
use serde::Serialize;

use super::AppState;
use crate::blob::StoredObject;
use crate::error::AppError;
use crate::models::{Asset, FileInfo, NewAsset};
use crate::validate::{normalize_tags, optional_text, TagsField};

/// Creates the upload/files router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/upload", post(upload_file))
        .route("/files", get(list_files))
        .with_state(state)
}

/// The one file consumed from a multipart body.
struct UploadedFile {
    original_name: String,
    content_type: String,
    bytes: Vec<u8>,
}

/// Upload response. `asset` is only present when a record was created.
#[derive(Serialize)]
struct UploadResponse {
    message: &'static str,
    url: String,
    key: String,
    size: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    asset: Option<Asset>,
}

/// POST /api/upload - Store one file; optionally create an asset record.
///
/// Exactly one file per request: the first `file` field wins and later ones
/// are skipped. Keys are timestamp-prefixed so repeated uploads of the same
/// filename never collide. When both `name` and `category` accompany the
/// file, an asset record referencing the stored key is created; a blob write
/// followed by a failed record write is not rolled back.
async fn upload_file(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>, AppError> {
    let mut file: Option<UploadedFile> = None;
    let mut name = None;
    let mut description = None;
    let mut category = None;
    let mut tags = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(format!("Invalid multipart body: {}", e)))?
    {
        let field_name = field.name().unwrap_or_default().to_string();
        match field_name.as_str() {
            "file" => {
                if file.is_some() {
                    continue;
                }
                let original_name = field.file_name().unwrap_or("upload.bin").to_string();
                let content_type = field
                    .content_type()
                    .unwrap_or("application/octet-stream")
                    .to_string();
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::BadRequest(format!("Invalid file field: {}", e)))?
                    .to_vec();
                file = Some(UploadedFile { original_name, content_type, bytes });
            }
            "name" => name = Some(read_text_field(field).await?),
            "description" => description = Some(read_text_field(field).await?),
            "category" => category = Some(read_text_field(field).await?),
            "tags" => tags = Some(read_text_field(field).await?),
            _ => {}
        }
    }

    let file = file.ok_or_else(|| AppError::BadRequest("No file uploaded".to_string()))?;
    let size = file.bytes.len() as u64;

    let key = format!("{}-{}", Utc::now().timestamp_millis(), file.original_name);
    let put = state.blobs.put(&key, file.bytes, &file.content_type).await?;

    let mut asset = None;
    if let (Some(name), Some(category)) = (non_empty(name), non_empty(category)) {
        let new = NewAsset {
            name,
            description: optional_text(description.as_deref()),
            category,
            tags: normalize_tags(tags.map(TagsField::Joined)),
            file_info: Some(FileInfo {
                filename: key.clone(),
                original_name: file.original_name.clone(),
                size,
                mimetype: file.content_type.clone(),
                key: put.key.clone(),
                url: put.url.clone(),
            }),
            metadata: Default::default(),
        };
        asset = Some(state.store.insert_asset(new).await?);
    }

    Ok(Json(UploadResponse {
        message: "File uploaded successfully",
        url: put.url,
        key: put.key,
        size,
        asset,
    }))
}

/// GET /api/files - All objects in the bucket.
async fn list_files(State(state): State<AppState>) -> Result<Json<Vec<StoredObject>>, AppError> {
    Ok(Json(state.blobs.list().await?))
}

async fn read_text_field(field: axum::extract::multipart::Field<'_>) -> Result<String, AppError> {
    field
        .text()
        .await
        .map_err(|e| AppError::BadRequest(format!("Invalid form field: {}", e)))
}

/// Trims and drops empty accompanying form values.
fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_empty_trims_and_filters() {
        assert_eq!(non_empty(Some("  Logo  ".to_string())), Some("Logo".to_string()));
        assert_eq!(non_empty(Some("   ".to_string())), None);
        assert_eq!(non_empty(None), None);
    }
}
