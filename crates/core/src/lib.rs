//! Core business logic for Photobin.
//!
//! This crate contains pure business logic with ZERO web or database dependencies.
//! All domain types, validation rules, and orchestration live here.
//!
//! # Modules
//!
//! - `photo` - Photo lifecycle over the blob store and the relational index
//! - `storage` - Vendor-agnostic blob persistence

pub mod photo;
pub mod storage;
