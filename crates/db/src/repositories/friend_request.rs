//! Friend request repository.

use std::sync::Arc;

use crate::entities::{FriendRequest, friend_request};
use cinecircle_common::{AppError, AppResult};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, ModelTrait, QueryFilter,
    QueryOrder, SqlErr,
};

/// Friend request repository for database operations.
#[derive(Clone)]
pub struct FriendRequestRepository {
    db: Arc<DatabaseConnection>,
}

impl FriendRequestRepository {
    /// Create a new friend request repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Find a friend request by ID.
    pub async fn find_by_id(&self, id: &str) -> AppResult<Option<friend_request::Model>> {
        FriendRequest::find_by_id(id)
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Find the request for an unordered user pair, regardless of direction.
    pub async fn find_by_pair(
        &self,
        a: &str,
        b: &str,
    ) -> AppResult<Option<friend_request::Model>> {
        FriendRequest::find()
            .filter(friend_request::Column::PairKey.eq(friend_request::pair_key(a, b)))
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Create a new friend request.
    ///
    /// A unique violation on `pair_key` (two concurrent sends racing past
    /// the existence check) surfaces as [`AppError::Conflict`].
    pub async fn create(
        &self,
        model: friend_request::ActiveModel,
    ) -> AppResult<friend_request::Model> {
        model.insert(self.db.as_ref()).await.map_err(|e| {
            if matches!(e.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) {
                AppError::Conflict(
                    "A friend request already exists between these users".to_string(),
                )
            } else {
                AppError::Database(e.to_string())
            }
        })
    }

    /// Update a friend request.
    pub async fn update(
        &self,
        model: friend_request::ActiveModel,
    ) -> AppResult<friend_request::Model> {
        model
            .update(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Delete a friend request. Returns true if a record was removed.
    pub async fn delete(&self, id: &str) -> AppResult<bool> {
        let request = self.find_by_id(id).await?;
        if let Some(r) = request {
            r.delete(self.db.as_ref())
                .await
                .map_err(|e| AppError::Database(e.to_string()))?;
            return Ok(true);
        }
        Ok(false)
    }

    /// Get pending requests received by a user, newest first.
    pub async fn find_pending_for(
        &self,
        user_id: &str,
    ) -> AppResult<Vec<friend_request::Model>> {
        FriendRequest::find()
            .filter(friend_request::Column::ReceiverId.eq(user_id))
            .filter(friend_request::Column::Status.eq(friend_request::RequestStatus::Pending))
            .order_by_desc(friend_request::Column::Id)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Get all requests sent by a user (any status), newest first.
    pub async fn find_sent_by(&self, user_id: &str) -> AppResult<Vec<friend_request::Model>> {
        FriendRequest::find()
            .filter(friend_request::Column::SenderId.eq(user_id))
            .order_by_desc(friend_request::Column::Id)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }
}
