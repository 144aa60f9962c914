//! `SeaORM` Entity for the photos table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "photos")]
pub struct Model {
    /// Insertion-ordered sequence assigned by the database, never reused.
    #[sea_orm(primary_key)]
    pub sequence: i64,
    /// Public identifier, shared with the blob store.
    #[sea_orm(unique)]
    pub identifier: Uuid,
    /// Original upload filename, metadata only.
    pub original_filename: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
