//! Photo service over the blob store and the relational index.
//!
//! This module provides business logic for photo management including:
//! - Upload decoding and validation
//! - Newest-first listing with fetch references
//! - Raw byte retrieval
//! - Deletion by identifier and of the latest upload

mod error;
mod service;
mod types;

pub use error::PhotoError;
pub use service::{PhotoIndex, PhotoService};
pub use types::{PLACEHOLDER_FILENAME, PhotoSummary};
