//! Photo service implementation.

use std::sync::Arc;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use tracing::warn;
use uuid::Uuid;

use super::error::PhotoError;
use super::types::{PLACEHOLDER_FILENAME, PhotoSummary};
use crate::storage::BlobStore;

/// Repository trait for the photo index.
///
/// This trait is implemented by the db crate to provide actual database
/// operations. The index orders rows by an internally assigned sequence
/// that strictly increases with insertion order and is never reused.
pub trait PhotoIndex: Send + Sync {
    /// Append a row for a stored photo.
    ///
    /// Fails on a duplicate identifier; identifiers come from the blob
    /// store, so duplicates indicate a bug rather than normal operation.
    fn insert(
        &self,
        id: Uuid,
        original_filename: &str,
    ) -> impl std::future::Future<Output = Result<(), PhotoError>> + Send;

    /// List identifiers newest-first, skipping `(page - 1) * limit` rows.
    ///
    /// Non-positive `limit` or `page` yield an empty list, never an error.
    fn list(
        &self,
        limit: u64,
        page: u64,
    ) -> impl std::future::Future<Output = Result<Vec<Uuid>, PhotoError>> + Send;

    /// Identifier with the highest sequence, if any rows exist.
    fn latest(&self)
    -> impl std::future::Future<Output = Result<Option<Uuid>, PhotoError>> + Send;

    /// Remove the row for an identifier. Returns false when absent.
    fn delete_by_id(
        &self,
        id: Uuid,
    ) -> impl std::future::Future<Output = Result<bool, PhotoError>> + Send;

    /// Total number of rows.
    fn count(&self) -> impl std::future::Future<Output = Result<u64, PhotoError>> + Send;
}

/// Photo service coupling the blob store with the index.
///
/// The blob and the index row are not written transactionally: creation
/// writes the blob first, deletion removes the blob first. A failure in
/// between leaves an orphan on the blob side only.
pub struct PhotoService<I: PhotoIndex> {
    store: Arc<BlobStore>,
    index: Arc<I>,
}

impl<I: PhotoIndex> PhotoService<I> {
    /// Create a new photo service.
    #[must_use]
    pub fn new(store: Arc<BlobStore>, index: Arc<I>) -> Self {
        Self { store, index }
    }

    /// Decode, persist, and index an uploaded photo.
    ///
    /// # Errors
    ///
    /// Returns `InvalidPayload` for bad base64 or a non-PNG payload; any
    /// other failure surfaces as a storage or index error.
    pub async fn create(&self, data: &str) -> Result<Uuid, PhotoError> {
        let bytes = STANDARD
            .decode(data)
            .map_err(|e| PhotoError::invalid_payload(format!("invalid base64 data: {e}")))?;

        let id = self.store.save(bytes).await?;
        self.index.insert(id, PLACEHOLDER_FILENAME).await?;

        Ok(id)
    }

    /// List stored photos newest-first with their fetch references.
    ///
    /// Pages beyond the last row produce an empty list.
    ///
    /// # Errors
    ///
    /// Returns an error if the index query or reference building fails.
    pub async fn list(&self, limit: u64, page: u64) -> Result<Vec<PhotoSummary>, PhotoError> {
        let ids = self.index.list(limit, page).await?;

        let mut photos = Vec::with_capacity(ids.len());
        for id in ids {
            let url = self.store.locate(id).await?;
            photos.push(PhotoSummary { id, url });
        }

        Ok(photos)
    }

    /// Build the fetch reference for an identifier.
    ///
    /// No existence check is made against the store or the index;
    /// verification is deferred to the raw-fetch path, so an unknown
    /// identifier yields a reference that 404s on fetch.
    ///
    /// # Errors
    ///
    /// Returns an error if reference building fails (S3 presign).
    pub async fn get(&self, id: Uuid) -> Result<PhotoSummary, PhotoError> {
        let url = self.store.locate(id).await?;
        Ok(PhotoSummary { id, url })
    }

    /// Raw stored bytes for an identifier.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` when no blob exists for the identifier.
    pub async fn read_raw(&self, id: Uuid) -> Result<Vec<u8>, PhotoError> {
        Ok(self.store.read(id).await?)
    }

    /// Delete the blob and its index row.
    ///
    /// The index row is removed once the blob delete has been attempted,
    /// whether or not a blob existed; index-delete failures are logged and
    /// swallowed. A missing blob still reports `NotFound`.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` when no blob existed, or a storage error if the
    /// blob delete itself fails.
    pub async fn delete(&self, id: Uuid) -> Result<(), PhotoError> {
        let removed = self.store.delete(id).await?;

        if let Err(e) = self.index.delete_by_id(id).await {
            warn!(photo_id = %id, error = %e, "Failed to remove index row after blob delete");
        }

        if removed {
            Ok(())
        } else {
            Err(PhotoError::NotFound(id))
        }
    }

    /// Delete the most recently uploaded photo.
    ///
    /// # Errors
    ///
    /// Returns `NoPhotos` when the index is empty; otherwise follows the
    /// same contract as [`delete`](Self::delete).
    pub async fn delete_latest(&self) -> Result<Uuid, PhotoError> {
        let id = self.index.latest().await?.ok_or(PhotoError::NoPhotos)?;
        self.delete(id).await?;
        Ok(id)
    }
}
