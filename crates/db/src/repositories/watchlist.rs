//! Watchlist repository.

use std::sync::Arc;

use crate::entities::{WatchlistItem, watchlist_item};
use cinecircle_common::{AppError, AppResult};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, ModelTrait, QueryFilter,
    QueryOrder, SqlErr,
};

/// Watchlist repository for database operations.
#[derive(Clone)]
pub struct WatchlistRepository {
    db: Arc<DatabaseConnection>,
}

impl WatchlistRepository {
    /// Create a new watchlist repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Get a user's watchlist, oldest first.
    pub async fn find_for_user(&self, user_id: &str) -> AppResult<Vec<watchlist_item::Model>> {
        WatchlistItem::find()
            .filter(watchlist_item::Column::UserId.eq(user_id))
            .order_by_asc(watchlist_item::Column::AddedAt)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Find a specific watchlist entry.
    pub async fn find_item(
        &self,
        user_id: &str,
        movie_id: &str,
    ) -> AppResult<Option<watchlist_item::Model>> {
        WatchlistItem::find()
            .filter(watchlist_item::Column::UserId.eq(user_id))
            .filter(watchlist_item::Column::MovieId.eq(movie_id))
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Add a movie to a user's watchlist.
    ///
    /// The `(user_id, movie_id)` unique index rejects duplicates; a
    /// violation surfaces as [`AppError::Conflict`].
    pub async fn create(
        &self,
        model: watchlist_item::ActiveModel,
    ) -> AppResult<watchlist_item::Model> {
        model.insert(self.db.as_ref()).await.map_err(|e| {
            if matches!(e.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) {
                AppError::Conflict("Movie already in watchlist".to_string())
            } else {
                AppError::Database(e.to_string())
            }
        })
    }

    /// Remove a movie from a user's watchlist. Returns true if removed.
    pub async fn delete_item(&self, user_id: &str, movie_id: &str) -> AppResult<bool> {
        let item = self.find_item(user_id, movie_id).await?;
        if let Some(i) = item {
            i.delete(self.db.as_ref())
                .await
                .map_err(|e| AppError::Database(e.to_string()))?;
            return Ok(true);
        }
        Ok(false)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::Utc;
    use sea_orm::{DatabaseBackend, MockDatabase};
    use std::sync::Arc;

    fn create_test_item(id: &str, user_id: &str, movie_id: &str) -> watchlist_item::Model {
        watchlist_item::Model {
            id: id.to_string(),
            user_id: user_id.to_string(),
            movie_id: movie_id.to_string(),
            title: "The Matrix".to_string(),
            poster_path: None,
            release_date: Some("1999-03-31".to_string()),
            added_at: Utc::now().into(),
        }
    }

    #[tokio::test]
    async fn test_find_for_user() {
        let item = create_test_item("w1", "u1", "603");

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[item]])
                .into_connection(),
        );

        let repo = WatchlistRepository::new(db);
        let result = repo.find_for_user("u1").await.unwrap();

        assert_eq!(result.len(), 1);
        assert_eq!(result[0].movie_id, "603");
    }

    #[tokio::test]
    async fn test_delete_missing_item_returns_false() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([Vec::<watchlist_item::Model>::new()])
                .into_connection(),
        );

        let repo = WatchlistRepository::new(db);
        let removed = repo.delete_item("u1", "603").await.unwrap();

        assert!(!removed);
    }
}
