//! Photo types and data structures.

use uuid::Uuid;

/// Filename recorded for uploads.
///
/// The upload body carries base64 data only, so the original filename never
/// reaches the service; the index stores this placeholder instead.
pub const PLACEHOLDER_FILENAME: &str = "unknown.png";

/// Identifier paired with a reference for fetching the raw bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhotoSummary {
    /// Photo identifier.
    pub id: Uuid,
    /// Reference string: the raw-fetch route (local backend) or a signed
    /// URL (S3 backend).
    pub url: String,
}
