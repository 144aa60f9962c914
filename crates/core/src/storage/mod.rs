//! Blob storage for photo objects using Apache OpenDAL.
//!
//! This module provides vendor-agnostic object storage with support for:
//! - S3-compatible: AWS S3, Cloudflare R2, MinIO
//! - Local filesystem (development)
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                      Apache OpenDAL                              │
//! │                   (Unified Storage API)                          │
//! ├─────────────────────────────────────────────────────────────────┤
//! │ op.write("key", data)      │ op.presign_read("key", duration)   │
//! │ op.read("key")             │ op.stat("key")                     │
//! │ op.delete("key")           │                                    │
//! └─────────────────────────────────────────────────────────────────┘
//! ```

mod config;
mod error;
mod service;

pub use config::{StorageConfig, StorageProvider};
pub use error::StorageError;
pub use service::{BlobStore, is_png, object_key};
