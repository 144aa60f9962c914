//! Database layer with `SeaORM` entities and repositories.
//!
//! This crate provides:
//! - `SeaORM` entity definitions
//! - Repository abstractions for data access
//! - Database migrations

pub mod entities;
pub mod migration;
pub mod repositories;

pub use repositories::PhotoIndexRepository;

use sea_orm::{ConnectOptions, Database, DatabaseConnection, DbErr};

/// Establishes a connection to the database.
///
/// Accepts anything convertible into [`ConnectOptions`], so callers can
/// pass a bare URL or tuned pool options.
///
/// # Errors
///
/// Returns an error if the connection cannot be established.
pub async fn connect<C>(options: C) -> Result<DatabaseConnection, DbErr>
where
    C: Into<ConnectOptions>,
{
    Database::connect(options).await
}
