//! Watchlist service.

use cinecircle_common::{AppError, AppResult, IdGenerator};
use cinecircle_db::{
    entities::{activity, activity::ActivityType, watchlist_item},
    repositories::{ActivityRepository, WatchlistRepository},
};
use sea_orm::Set;
use serde::Deserialize;
use validator::Validate;

/// Payload for adding a movie to a watchlist.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct AddWatchlistInput {
    #[validate(length(min = 1, message = "User ID is required"))]
    pub user_id: String,
    #[validate(length(min = 1, message = "Movie ID is required"))]
    pub movie_id: String,
    #[validate(length(min = 1, message = "Title is required"))]
    pub title: String,
    pub poster_path: Option<String>,
    pub release_date: Option<String>,
}

/// Watchlist service for business logic.
#[derive(Clone)]
pub struct WatchlistService {
    watchlist_repo: WatchlistRepository,
    activity_repo: ActivityRepository,
    id_gen: IdGenerator,
}

impl WatchlistService {
    /// Create a new watchlist service.
    #[must_use]
    pub fn new(watchlist_repo: WatchlistRepository, activity_repo: ActivityRepository) -> Self {
        Self {
            watchlist_repo,
            activity_repo,
            id_gen: IdGenerator::new(),
        }
    }

    /// A user's watchlist, oldest first.
    pub async fn list(&self, user_id: &str) -> AppResult<Vec<watchlist_item::Model>> {
        self.watchlist_repo.find_for_user(user_id).await
    }

    /// Add a movie and log the activity. Returns the updated list.
    pub async fn add(&self, input: AddWatchlistInput) -> AppResult<Vec<watchlist_item::Model>> {
        input.validate()?;

        if self
            .watchlist_repo
            .find_item(&input.user_id, &input.movie_id)
            .await?
            .is_some()
        {
            return Err(AppError::BadRequest(
                "Movie already in watchlist".to_string(),
            ));
        }

        let item = watchlist_item::ActiveModel {
            id: Set(self.id_gen.generate()),
            user_id: Set(input.user_id.clone()),
            movie_id: Set(input.movie_id.clone()),
            title: Set(input.title.clone()),
            poster_path: Set(input.poster_path.clone()),
            release_date: Set(input.release_date),
            ..Default::default()
        };
        self.watchlist_repo.create(item).await?;

        let entry = activity::ActiveModel {
            id: Set(self.id_gen.generate()),
            user_id: Set(input.user_id.clone()),
            activity_type: Set(ActivityType::Watchlist),
            movie_id: Set(Some(input.movie_id)),
            movie_title: Set(Some(input.title)),
            movie_poster_path: Set(input.poster_path),
            ..Default::default()
        };
        self.activity_repo.create(entry).await?;

        self.watchlist_repo.find_for_user(&input.user_id).await
    }

    /// Remove a movie. Returns the updated list.
    pub async fn remove(
        &self,
        user_id: &str,
        movie_id: &str,
    ) -> AppResult<Vec<watchlist_item::Model>> {
        if !self.watchlist_repo.delete_item(user_id, movie_id).await? {
            return Err(AppError::NotFound("Watchlist item not found".to_string()));
        }

        self.watchlist_repo.find_for_user(user_id).await
    }
}
