//! Photo index repository for database operations.
//!
//! Implements the insertion-ordered photo index using `SeaORM`.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, Set,
};
use uuid::Uuid;

use crate::entities::photos;
use photobin_core::photo::{PhotoError, PhotoIndex};

/// Photo index repository implementation.
#[derive(Debug, Clone)]
pub struct PhotoIndexRepository {
    db: DatabaseConnection,
}

impl PhotoIndexRepository {
    /// Create a new photo index repository.
    #[must_use]
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

impl PhotoIndex for PhotoIndexRepository {
    async fn insert(&self, id: Uuid, original_filename: &str) -> Result<(), PhotoError> {
        let active_model = photos::ActiveModel {
            identifier: Set(id),
            original_filename: Set(original_filename.to_string()),
            ..Default::default()
        };

        active_model
            .insert(&self.db)
            .await
            .map_err(|e| PhotoError::index(e.to_string()))?;

        Ok(())
    }

    async fn list(&self, limit: u64, page: u64) -> Result<Vec<Uuid>, PhotoError> {
        if limit == 0 || page == 0 {
            return Ok(Vec::new());
        }

        let models = photos::Entity::find()
            .order_by_desc(photos::Column::Sequence)
            .offset((page - 1).saturating_mul(limit))
            .limit(limit)
            .all(&self.db)
            .await
            .map_err(|e| PhotoError::index(e.to_string()))?;

        Ok(models.into_iter().map(|m| m.identifier).collect())
    }

    async fn latest(&self) -> Result<Option<Uuid>, PhotoError> {
        let model = photos::Entity::find()
            .order_by_desc(photos::Column::Sequence)
            .one(&self.db)
            .await
            .map_err(|e| PhotoError::index(e.to_string()))?;

        Ok(model.map(|m| m.identifier))
    }

    async fn delete_by_id(&self, id: Uuid) -> Result<bool, PhotoError> {
        let result = photos::Entity::delete_many()
            .filter(photos::Column::Identifier.eq(id))
            .exec(&self.db)
            .await
            .map_err(|e| PhotoError::index(e.to_string()))?;

        Ok(result.rows_affected > 0)
    }

    async fn count(&self) -> Result<u64, PhotoError> {
        photos::Entity::find()
            .count(&self.db)
            .await
            .map_err(|e| PhotoError::index(e.to_string()))
    }
}
