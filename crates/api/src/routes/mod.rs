//! API route definitions.

use axum::Router;

use crate::AppState;

pub mod health;
pub mod photos;

/// Creates the API router with all routes.
pub fn api_routes() -> Router<AppState> {
    Router::new().merge(health::routes()).merge(photos::routes())
}
