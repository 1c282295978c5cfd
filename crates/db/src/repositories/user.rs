//! User repository.

use std::sync::Arc;

use crate::entities::{User, user};
use cinecircle_common::{AppError, AppResult};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, ModelTrait, QueryFilter,
    QueryOrder, SqlErr,
};

/// User repository for database operations.
#[derive(Clone)]
pub struct UserRepository {
    db: Arc<DatabaseConnection>,
}

impl UserRepository {
    /// Create a new user repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Find a user by external (identity-provider) ID.
    pub async fn find_by_external_id(&self, external_id: &str) -> AppResult<Option<user::Model>> {
        User::find()
            .filter(user::Column::ExternalId.eq(external_id))
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Find a user by external ID, returning an error if not found.
    pub async fn get_by_external_id(&self, external_id: &str) -> AppResult<user::Model> {
        self.find_by_external_id(external_id)
            .await?
            .ok_or_else(|| AppError::UserNotFound(external_id.to_string()))
    }

    /// Find users by external IDs (single batched query).
    pub async fn find_by_external_ids(&self, ids: &[String]) -> AppResult<Vec<user::Model>> {
        if ids.is_empty() {
            return Ok(vec![]);
        }

        User::find()
            .filter(user::Column::ExternalId.is_in(ids.to_vec()))
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Get all users, newest first.
    pub async fn find_all(&self) -> AppResult<Vec<user::Model>> {
        User::find()
            .order_by_desc(user::Column::CreatedAt)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Create a new user.
    ///
    /// A unique violation on `external_id` (two sync paths racing) surfaces
    /// as [`AppError::Conflict`].
    pub async fn create(&self, model: user::ActiveModel) -> AppResult<user::Model> {
        model.insert(self.db.as_ref()).await.map_err(|e| {
            if matches!(e.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) {
                AppError::Conflict("User already exists".to_string())
            } else {
                AppError::Database(e.to_string())
            }
        })
    }

    /// Update a user.
    pub async fn update(&self, model: user::ActiveModel) -> AppResult<user::Model> {
        model
            .update(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Hard-delete a user by external ID. Returns the deleted record, if any.
    ///
    /// Does not cascade: friend requests and activities referencing the
    /// external ID are retained.
    pub async fn delete_by_external_id(
        &self,
        external_id: &str,
    ) -> AppResult<Option<user::Model>> {
        let user = self.find_by_external_id(external_id).await?;
        if let Some(u) = user.clone() {
            u.delete(self.db.as_ref())
                .await
                .map_err(|e| AppError::Database(e.to_string()))?;
        }
        Ok(user)
    }
}
