//! Photo error types.

use thiserror::Error;
use uuid::Uuid;

use crate::storage::StorageError;

/// Photo operation errors.
#[derive(Debug, Error)]
pub enum PhotoError {
    /// Upload payload was not base64-encoded PNG data.
    #[error("invalid payload: {0}")]
    InvalidPayload(String),

    /// Photo not found.
    #[error("photo not found: {0}")]
    NotFound(Uuid),

    /// Latest lookup on an empty index.
    #[error("no photos uploaded yet")]
    NoPhotos,

    /// Storage operation failed.
    #[error("storage error: {0}")]
    Storage(StorageError),

    /// Index operation failed.
    #[error("index error: {0}")]
    Index(String),
}

impl PhotoError {
    /// Create an invalid payload error.
    #[must_use]
    pub fn invalid_payload(msg: impl Into<String>) -> Self {
        Self::InvalidPayload(msg.into())
    }

    /// Create an index error.
    #[must_use]
    pub fn index(msg: impl Into<String>) -> Self {
        Self::Index(msg.into())
    }
}

impl From<StorageError> for PhotoError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::NotPng => Self::InvalidPayload(err.to_string()),
            StorageError::NotFound { id } => Self::NotFound(id),
            other => Self::Storage(other),
        }
    }
}
