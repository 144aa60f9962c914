//! Photo management routes.
//!
//! Uploads carry base64-encoded PNG bytes in JSON; raw bytes are served
//! back from the blob store under `/photos/raw/{id}`.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::{StatusCode, header},
    response::IntoResponse,
    routing::{delete, get, post},
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Arc;
use tracing::{error, info};
use uuid::Uuid;

use crate::AppState;
use photobin_core::photo::{PhotoError, PhotoService};
use photobin_db::PhotoIndexRepository;
use photobin_shared::PageRequest;

/// Creates the photo routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        // Collection routes
        .route("/photos", post(create_photo))
        .route("/photos", get(list_photos))
        // Static segments take precedence over the `{id}` capture
        .route("/photos/latest", delete(delete_latest_photo))
        .route("/photos/raw/{id}", get(get_raw_photo))
        // Item routes
        .route("/photos/{id}", get(get_photo))
        .route("/photos/{id}", delete(delete_photo))
}

// ============================================================================
// Request/Response Types
// ============================================================================

/// Request body for uploading a photo.
#[derive(Debug, Deserialize)]
pub struct UploadPhotoRequest {
    /// Base64-encoded PNG bytes.
    pub data: String,
}

/// Response for a newly created photo.
#[derive(Debug, Serialize)]
pub struct CreatedPhotoResponse {
    /// Assigned photo ID.
    pub id: Uuid,
}

/// Response pairing a photo ID with its fetch URL.
#[derive(Debug, Serialize)]
pub struct PhotoResponse {
    /// Photo ID.
    pub id: Uuid,
    /// URL serving the raw bytes.
    pub url: String,
}

// ============================================================================
// Helper Functions
// ============================================================================

/// Build the photo service over the shared state.
fn photo_service(state: &AppState) -> PhotoService<PhotoIndexRepository> {
    let index = PhotoIndexRepository::new((*state.db).clone());
    PhotoService::new(state.store.clone(), Arc::new(index))
}

/// 404 response with a short message.
fn not_found(message: &str) -> axum::response::Response {
    (
        StatusCode::NOT_FOUND,
        Json(json!({
            "error": "not_found",
            "message": message
        })),
    )
        .into_response()
}

/// Generic 500 response with no internal detail.
fn internal_error() -> axum::response::Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({
            "error": "internal_error",
            "message": "An error occurred"
        })),
    )
        .into_response()
}

// ============================================================================
// Route Handlers
// ============================================================================

/// POST `/photos`
/// Upload a base64-encoded PNG.
async fn create_photo(
    State(state): State<AppState>,
    Json(payload): Json<UploadPhotoRequest>,
) -> impl IntoResponse {
    let service = photo_service(&state);

    match service.create(&payload.data).await {
        Ok(id) => {
            info!(photo_id = %id, "Photo uploaded");
            (StatusCode::CREATED, Json(CreatedPhotoResponse { id })).into_response()
        }
        Err(PhotoError::InvalidPayload(message)) => (
            StatusCode::BAD_REQUEST,
            Json(json!({
                "error": "invalid_payload",
                "message": message
            })),
        )
            .into_response(),
        Err(e) => {
            error!(error = %e, "Failed to upload photo");
            internal_error()
        }
    }
}

/// GET `/photos`
/// List photos newest-first with pagination.
async fn list_photos(
    State(state): State<AppState>,
    Query(page): Query<PageRequest>,
) -> impl IntoResponse {
    if let Err(message) = page.validate() {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({
                "error": "invalid_pagination",
                "message": message
            })),
        )
            .into_response();
    }

    let service = photo_service(&state);

    match service
        .list(u64::from(page.limit), u64::from(page.page))
        .await
    {
        Ok(photos) => {
            let items: Vec<PhotoResponse> = photos
                .into_iter()
                .map(|p| PhotoResponse {
                    id: p.id,
                    url: p.url,
                })
                .collect();

            (StatusCode::OK, Json(items)).into_response()
        }
        Err(e) => {
            error!(error = %e, "Failed to list photos");
            internal_error()
        }
    }
}

/// GET `/photos/{id}`
/// Build a photo reference for an ID.
///
/// No existence check is made; an unknown ID yields a URL that 404s on
/// fetch.
async fn get_photo(State(state): State<AppState>, Path(id): Path<Uuid>) -> impl IntoResponse {
    let service = photo_service(&state);

    match service.get(id).await {
        Ok(photo) => (
            StatusCode::OK,
            Json(PhotoResponse {
                id: photo.id,
                url: photo.url,
            }),
        )
            .into_response(),
        Err(e) => {
            error!(error = %e, photo_id = %id, "Failed to build photo reference");
            internal_error()
        }
    }
}

/// GET `/photos/raw/{id}`
/// Serve the stored PNG bytes.
async fn get_raw_photo(State(state): State<AppState>, Path(id): Path<Uuid>) -> impl IntoResponse {
    let service = photo_service(&state);

    match service.read_raw(id).await {
        Ok(bytes) => {
            (StatusCode::OK, [(header::CONTENT_TYPE, "image/png")], bytes).into_response()
        }
        Err(PhotoError::NotFound(_)) => not_found("Photo not found"),
        Err(e) => {
            error!(error = %e, photo_id = %id, "Failed to read photo bytes");
            internal_error()
        }
    }
}

/// DELETE `/photos/{id}`
/// Delete a photo and its index row.
async fn delete_photo(State(state): State<AppState>, Path(id): Path<Uuid>) -> impl IntoResponse {
    let service = photo_service(&state);

    match service.delete(id).await {
        Ok(()) => {
            info!(photo_id = %id, "Photo deleted");
            (StatusCode::OK, Json(json!({ "message": "OK" }))).into_response()
        }
        Err(PhotoError::NotFound(_)) => not_found("Photo not found"),
        Err(e) => {
            error!(error = %e, photo_id = %id, "Failed to delete photo");
            internal_error()
        }
    }
}

/// DELETE `/photos/latest`
/// Delete the most recently uploaded photo.
async fn delete_latest_photo(State(state): State<AppState>) -> impl IntoResponse {
    let service = photo_service(&state);

    match service.delete_latest().await {
        Ok(id) => {
            info!(photo_id = %id, "Latest photo deleted");
            (StatusCode::OK, Json(json!({ "message": "OK" }))).into_response()
        }
        Err(PhotoError::NoPhotos) => not_found("No photos uploaded yet"),
        Err(PhotoError::NotFound(_)) => not_found("Photo not found"),
        Err(e) => {
            error!(error = %e, "Failed to delete latest photo");
            internal_error()
        }
    }
}
