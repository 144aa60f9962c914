//! Photobin API Server
//!
//! Main entry point for the Photobin photo service.

use std::sync::Arc;

use sea_orm::ConnectOptions;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use photobin_api::{AppState, create_router};
use photobin_core::storage::{BlobStore, StorageConfig, StorageProvider};
use photobin_db::connect;
use photobin_shared::AppConfig;
use photobin_shared::config::StorageSettings;

/// Build the blob store configuration from settings.
///
/// Unknown backend names are a startup error rather than a silent
/// fallback.
fn storage_config(settings: &StorageSettings) -> anyhow::Result<StorageConfig> {
    let provider = match settings.backend.as_str() {
        "local" => StorageProvider::local_fs(&settings.local_root),
        "s3" => StorageProvider::s3(
            settings.endpoint.as_str(),
            settings.bucket.as_str(),
            settings.access_key_id.as_str(),
            settings.secret_access_key.as_str(),
            settings.region.as_str(),
            settings.prefix.as_str(),
        ),
        other => anyhow::bail!("unsupported storage backend: {other}"),
    };

    Ok(StorageConfig::new(provider).with_presign_ttl(settings.presign_ttl_secs))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "photobin_api=debug,photobin_core=debug,photobin_db=debug,tower_http=debug".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = AppConfig::load().expect("Failed to load configuration");

    // Connect to database
    let mut options = ConnectOptions::new(config.database.url.clone());
    options
        .max_connections(config.database.max_connections)
        .min_connections(config.database.min_connections);
    let db = connect(options).await?;
    info!("Connected to database");

    // Build the blob store
    let store = BlobStore::from_config(storage_config(&config.storage)?)?;
    info!(provider = %store.provider_name(), "Blob store configured");

    // Create application state
    let state = AppState {
        db: Arc::new(db),
        store: Arc::new(store),
    };

    // Create router
    let app = create_router(state, config.storage.max_upload_bytes);

    // Start server
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
