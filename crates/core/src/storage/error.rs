//! Storage error types.

use thiserror::Error;
use uuid::Uuid;

/// Storage operation errors.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Payload does not carry the PNG signature.
    #[error("invalid image data: only PNG is allowed")]
    NotPng,

    /// No object exists for the identifier.
    #[error("photo not found: {id}")]
    NotFound {
        /// Identifier with no stored object.
        id: Uuid,
    },

    /// Presign operation not supported by provider.
    #[error("presign operation not supported by storage provider")]
    PresignNotSupported,

    /// Storage provider configuration error.
    #[error("storage configuration error: {0}")]
    Configuration(String),

    /// OpenDAL operation error.
    #[error("storage operation failed: {0}")]
    Operation(String),
}

impl StorageError {
    /// Create a not found error.
    #[must_use]
    pub fn not_found(id: Uuid) -> Self {
        Self::NotFound { id }
    }

    /// Create a configuration error.
    #[must_use]
    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }

    /// Create an operation error.
    #[must_use]
    pub fn operation(msg: impl Into<String>) -> Self {
        Self::Operation(msg.into())
    }
}
