//! Storage configuration types.

use std::path::PathBuf;

/// Storage provider configuration.
#[derive(Debug, Clone)]
pub enum StorageProvider {
    /// S3-compatible storage: AWS S3, Cloudflare R2, MinIO
    S3 {
        /// S3 endpoint URL.
        endpoint: String,
        /// S3 bucket name.
        bucket: String,
        /// AWS access key ID.
        access_key_id: String,
        /// AWS secret access key.
        secret_access_key: String,
        /// AWS region.
        region: String,
        /// Key prefix inside the bucket. Empty means the bucket root.
        prefix: String,
    },
    /// Local filesystem (development only)
    LocalFs {
        /// Root directory path.
        root: PathBuf,
    },
}

impl StorageProvider {
    /// Create S3-compatible provider (AWS S3, Cloudflare R2, MinIO).
    #[must_use]
    pub fn s3(
        endpoint: impl Into<String>,
        bucket: impl Into<String>,
        access_key_id: impl Into<String>,
        secret_access_key: impl Into<String>,
        region: impl Into<String>,
        prefix: impl Into<String>,
    ) -> Self {
        Self::S3 {
            endpoint: endpoint.into(),
            bucket: bucket.into(),
            access_key_id: access_key_id.into(),
            secret_access_key: secret_access_key.into(),
            region: region.into(),
            prefix: prefix.into(),
        }
    }

    /// Create local filesystem provider (development only).
    #[must_use]
    pub fn local_fs(root: impl Into<PathBuf>) -> Self {
        Self::LocalFs { root: root.into() }
    }

    /// Get the provider name for logging.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::S3 { .. } => "s3",
            Self::LocalFs { .. } => "local",
        }
    }
}

/// Blob store configuration.
#[derive(Debug, Clone)]
pub struct StorageConfig {
    /// Storage provider configuration.
    pub provider: StorageProvider,
    /// Signed download URL TTL in seconds (S3 backend only).
    pub presign_ttl_secs: u64,
}

impl StorageConfig {
    /// Default signed URL TTL: 1 hour.
    pub const DEFAULT_PRESIGN_TTL: u64 = 3600;

    /// Create a new storage config with default settings.
    #[must_use]
    pub fn new(provider: StorageProvider) -> Self {
        Self {
            provider,
            presign_ttl_secs: Self::DEFAULT_PRESIGN_TTL,
        }
    }

    /// Set the signed download URL TTL.
    #[must_use]
    pub fn with_presign_ttl(mut self, secs: u64) -> Self {
        self.presign_ttl_secs = secs;
        self
    }
}
