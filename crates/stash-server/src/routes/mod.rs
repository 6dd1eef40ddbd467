//! API routes for the stash server.

pub mod assets;
pub mod todos;
pub mod uploads;

use std::sync::Arc;

use axum::routing::get;
use axum::{Json, Router};
use serde_json::{json, Value};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::blob::BlobStore;
use crate::store::Store;

/// Shared handler state: the process-wide store and blob clients, constructed
/// once at startup and reused for every request.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn Store>,
    pub blobs: Arc<dyn BlobStore>,
    pub signed_url_ttl_secs: u64,
}

/// Creates the main router with all routes mounted. CORS is permissive on
/// every route; preflight `OPTIONS` requests are answered by the layer.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .nest("/api", api_routes(state))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

fn api_routes(state: AppState) -> Router {
    Router::new()
        .nest("/todos", todos::router(state.clone()))
        .nest("/assets", assets::router(state.clone()))
        .merge(uploads::router(state))
}

/// GET / - Service banner with the endpoint map.
async fn index() -> Json<Value> {
    Json(json!({
        "message": "Stash backend API is running!",
        "endpoints": {
            "GET /api/todos": "Get all todos",
            "POST /api/todos": "Create a new todo",
            "PUT /api/todos/{id}": "Update a todo",
            "DELETE /api/todos/{id}": "Delete a todo",
            "GET /api/assets": "Get assets with optional filtering and pagination",
            "POST /api/assets": "Create a new asset",
            "PUT /api/assets/{id}": "Update an asset",
            "DELETE /api/assets/{id}": "Delete an asset (soft by default)",
            "GET /api/assets/categories": "Get all unique categories",
            "GET /api/assets/{id}/download": "Get a signed download URL",
            "POST /api/upload": "Upload a file to object storage",
            "GET /api/files": "List all files in the bucket"
        },
        "status": "active"
    }))
}
