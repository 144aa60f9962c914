//! Application configuration management.

use serde::Deserialize;
use std::path::PathBuf;

/// Application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Server configuration.
    pub server: ServerConfig,
    /// Database configuration.
    pub database: DatabaseConfig,
    /// Blob storage configuration.
    pub storage: StorageSettings,
}

/// Server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to.
    #[serde(default = "default_host")]
    pub host: String,
    /// Port to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

/// Database configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// Database connection URL.
    pub url: String,
    /// Maximum number of connections in the pool.
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    /// Minimum number of connections in the pool.
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
}

fn default_max_connections() -> u32 {
    10
}

fn default_min_connections() -> u32 {
    1
}

/// Blob storage configuration.
///
/// The `backend` field selects the storage variant; the remaining fields
/// only apply to the backend they belong to.
#[derive(Debug, Clone, Deserialize)]
pub struct StorageSettings {
    /// Storage backend: `local` or `s3`.
    #[serde(default = "default_backend")]
    pub backend: String,
    /// Root directory for the local backend.
    #[serde(default = "default_local_root")]
    pub local_root: PathBuf,
    /// Endpoint URL (s3 backend).
    #[serde(default)]
    pub endpoint: String,
    /// Bucket name (s3 backend).
    #[serde(default)]
    pub bucket: String,
    /// Access key ID (s3 backend).
    #[serde(default)]
    pub access_key_id: String,
    /// Secret access key (s3 backend).
    #[serde(default)]
    pub secret_access_key: String,
    /// Region (s3 backend).
    #[serde(default = "default_region")]
    pub region: String,
    /// Key prefix inside the bucket (s3 backend). Empty means the bucket
    /// root.
    #[serde(default)]
    pub prefix: String,
    /// Signed download URL lifetime in seconds (s3 backend).
    #[serde(default = "default_presign_ttl")]
    pub presign_ttl_secs: u64,
    /// Maximum accepted upload body size in bytes.
    #[serde(default = "default_max_upload_bytes")]
    pub max_upload_bytes: usize,
}

fn default_backend() -> String {
    "local".to_string()
}

fn default_local_root() -> PathBuf {
    PathBuf::from("./data")
}

fn default_region() -> String {
    "auto".to_string()
}

fn default_presign_ttl() -> u64 {
    3600 // 1 hour
}

fn default_max_upload_bytes() -> usize {
    10 * 1024 * 1024 // 10 MiB
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(config::Environment::with_prefix("PHOTOBIN").separator("__"))
            .build()?;

        config.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(raw: &str) -> AppConfig {
        config::Config::builder()
            .add_source(config::File::from_str(raw, config::FileFormat::Toml))
            .build()
            .expect("config should build")
            .try_deserialize()
            .expect("config should deserialize")
    }

    #[test]
    fn minimal_config_fills_defaults() {
        let app = parse(
            r#"
            [server]
            [database]
            url = "sqlite://photobin.sqlite?mode=rwc"
            [storage]
            "#,
        );

        assert_eq!(app.server.host, "0.0.0.0");
        assert_eq!(app.server.port, 8080);
        assert_eq!(app.database.max_connections, 10);
        assert_eq!(app.database.min_connections, 1);
        assert_eq!(app.storage.backend, "local");
        assert_eq!(app.storage.local_root, PathBuf::from("./data"));
        assert_eq!(app.storage.presign_ttl_secs, 3600);
        assert_eq!(app.storage.max_upload_bytes, 10 * 1024 * 1024);
    }

    #[test]
    fn s3_backend_settings_parse() {
        let app = parse(
            r#"
            [server]
            port = 9000
            [database]
            url = "postgres://localhost/photobin"
            [storage]
            backend = "s3"
            endpoint = "https://account.r2.cloudflarestorage.com"
            bucket = "photos"
            access_key_id = "key"
            secret_access_key = "secret"
            prefix = "uploads/"
            presign_ttl_secs = 900
            "#,
        );

        assert_eq!(app.server.port, 9000);
        assert_eq!(app.storage.backend, "s3");
        assert_eq!(app.storage.bucket, "photos");
        assert_eq!(app.storage.region, "auto");
        assert_eq!(app.storage.prefix, "uploads/");
        assert_eq!(app.storage.presign_ttl_secs, 900);
    }

    #[test]
    fn missing_database_url_is_rejected() {
        let result = config::Config::builder()
            .add_source(config::File::from_str(
                "[server]\n[database]\n[storage]\n",
                config::FileFormat::Toml,
            ))
            .build()
            .expect("config should build")
            .try_deserialize::<AppConfig>();

        assert!(result.is_err());
    }
}
