//! HTTP API layer with Axum routes.
//!
//! This crate provides:
//! - REST API routes
//! - Shared application state
//! - Request body limits sized for base64 uploads

pub mod routes;

use axum::Router;
use axum::extract::DefaultBodyLimit;
use photobin_core::storage::BlobStore;
use sea_orm::DatabaseConnection;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub db: Arc<DatabaseConnection>,
    /// Blob store holding photo bytes.
    pub store: Arc<BlobStore>,
}

/// Creates the main application router.
///
/// `max_body_bytes` caps request bodies; uploads carry base64-encoded
/// PNGs in JSON, so this must exceed the largest accepted photo by the
/// base64 overhead.
pub fn create_router(state: AppState, max_body_bytes: usize) -> Router {
    Router::new()
        .merge(routes::api_routes())
        .layer(DefaultBodyLimit::max(max_body_bytes))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
