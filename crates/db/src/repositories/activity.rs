//! Activity repository.

use std::sync::Arc;

use crate::entities::{Activity, activity};
use cinecircle_common::{AppError, AppResult};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, QueryFilter,
    QueryOrder, QuerySelect,
};

/// Activity repository for database operations.
#[derive(Clone)]
pub struct ActivityRepository {
    db: Arc<DatabaseConnection>,
}

impl ActivityRepository {
    /// Create a new activity repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Append an activity record.
    pub async fn create(&self, model: activity::ActiveModel) -> AppResult<activity::Model> {
        model
            .insert(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Get a user's activities, newest first.
    pub async fn find_for_user(
        &self,
        user_id: &str,
        limit: u64,
    ) -> AppResult<Vec<activity::Model>> {
        Activity::find()
            .filter(activity::Column::UserId.eq(user_id))
            .order_by_desc(activity::Column::CreatedAt)
            .limit(limit)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Get activities for a user and their friends, newest first.
    pub async fn find_feed(
        &self,
        user_id: &str,
        friend_ids: &[String],
        limit: u64,
    ) -> AppResult<Vec<activity::Model>> {
        let mut condition = Condition::any().add(activity::Column::UserId.eq(user_id));
        if !friend_ids.is_empty() {
            condition = condition.add(activity::Column::UserId.is_in(friend_ids.to_vec()));
        }

        Activity::find()
            .filter(condition)
            .order_by_desc(activity::Column::CreatedAt)
            .limit(limit)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }
}
