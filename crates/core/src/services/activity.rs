//! Activity log service.

use cinecircle_common::{AppResult, IdGenerator};
use cinecircle_db::{
    entities::{
        activity,
        activity::ActivityType,
    },
    repositories::{ActivityRepository, UserRepository},
};
use sea_orm::Set;
use serde::Deserialize;
use validator::Validate;

/// Default page size for activity listings.
pub const DEFAULT_ACTIVITY_LIMIT: u64 = 50;

/// Payload for appending an activity record.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RecordActivityInput {
    #[validate(length(min = 1, message = "User ID is required"))]
    pub user_id: String,
    #[serde(rename = "type")]
    pub activity_type: ActivityType,
    pub movie_id: Option<String>,
    pub movie_title: Option<String>,
    pub movie_poster_path: Option<String>,
    #[validate(range(min = 0.0, max = 5.0, message = "Rating must be between 0 and 5"))]
    pub rating: Option<f32>,
    pub content: Option<String>,
    pub friend_id: Option<String>,
}

/// Activity service for business logic.
#[derive(Clone)]
pub struct ActivityService {
    activity_repo: ActivityRepository,
    user_repo: UserRepository,
    id_gen: IdGenerator,
}

impl ActivityService {
    /// Create a new activity service.
    #[must_use]
    pub fn new(activity_repo: ActivityRepository, user_repo: UserRepository) -> Self {
        Self {
            activity_repo,
            user_repo,
            id_gen: IdGenerator::new(),
        }
    }

    /// Append an activity record.
    ///
    /// The author is not checked against the user table: a record written
    /// moments before its author is deleted is indistinguishable from one
    /// written after, and the feed tolerates orphans either way.
    pub async fn record(&self, input: RecordActivityInput) -> AppResult<activity::Model> {
        input.validate()?;

        let model = activity::ActiveModel {
            id: Set(self.id_gen.generate()),
            user_id: Set(input.user_id),
            activity_type: Set(input.activity_type),
            movie_id: Set(input.movie_id),
            movie_title: Set(input.movie_title),
            movie_poster_path: Set(input.movie_poster_path),
            rating: Set(input.rating),
            content: Set(input.content),
            friend_id: Set(input.friend_id),
            ..Default::default()
        };

        self.activity_repo.create(model).await
    }

    /// A single user's activities, newest first.
    pub async fn for_user(&self, user_id: &str) -> AppResult<Vec<activity::Model>> {
        self.activity_repo
            .find_for_user(user_id, DEFAULT_ACTIVITY_LIMIT)
            .await
    }

    /// Merged feed of a user's own and their friends' activities.
    pub async fn feed_for(&self, user_id: &str) -> AppResult<Vec<activity::Model>> {
        let user = self.user_repo.get_by_external_id(user_id).await?;

        self.activity_repo
            .find_feed(user_id, &user.friends.0, DEFAULT_ACTIVITY_LIMIT)
            .await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::Utc;
    use cinecircle_common::AppError;
    use cinecircle_db::entities::user;
    use cinecircle_db::entities::user::FriendIds;
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};
    use std::sync::Arc;

    fn service_with(db: sea_orm::DatabaseConnection) -> ActivityService {
        let db = Arc::new(db);
        ActivityService::new(
            ActivityRepository::new(Arc::clone(&db)),
            UserRepository::new(db),
        )
    }

    fn record_input(user_id: &str) -> RecordActivityInput {
        RecordActivityInput {
            user_id: user_id.to_string(),
            activity_type: ActivityType::Watched,
            movie_id: Some("603".to_string()),
            movie_title: Some("The Matrix".to_string()),
            movie_poster_path: None,
            rating: Some(4.5),
            content: None,
            friend_id: None,
        }
    }

    fn create_test_activity(id: &str, user_id: &str) -> activity::Model {
        activity::Model {
            id: id.to_string(),
            user_id: user_id.to_string(),
            activity_type: ActivityType::Watched,
            movie_id: Some("603".to_string()),
            movie_title: Some("The Matrix".to_string()),
            movie_poster_path: None,
            rating: Some(4.5),
            content: None,
            friend_id: None,
            created_at: Utc::now().into(),
        }
    }

    #[tokio::test]
    async fn test_record_empty_user_id_returns_validation_error() {
        let service = service_with(
            MockDatabase::new(DatabaseBackend::Postgres).into_connection(),
        );

        let result = service.record(record_input("")).await;
        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn test_record_out_of_range_rating_returns_validation_error() {
        let service = service_with(
            MockDatabase::new(DatabaseBackend::Postgres).into_connection(),
        );

        let mut input = record_input("u1");
        input.rating = Some(7.0);

        let result = service.record(input).await;
        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn test_record_creates_activity() {
        let created = create_test_activity("a1", "u1");

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![created]])
            .append_exec_results([MockExecResult {
                last_insert_id: 0,
                rows_affected: 1,
            }])
            .into_connection();

        let service = service_with(db);
        let activity = service.record(record_input("u1")).await.unwrap();

        assert_eq!(activity.activity_type, ActivityType::Watched);
    }

    #[tokio::test]
    async fn test_feed_for_unknown_user_returns_not_found() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<user::Model>::new()])
            .into_connection();

        let service = service_with(db);
        let result = service.feed_for("missing").await;

        assert!(matches!(result, Err(AppError::UserNotFound(_))));
    }

    #[tokio::test]
    async fn test_feed_for_includes_own_and_friends() {
        let user = user::Model {
            id: "id_u1".to_string(),
            external_id: "u1".to_string(),
            first_name: "Test".to_string(),
            last_name: "User".to_string(),
            email: "u1@example.com".to_string(),
            profile_picture: String::new(),
            friends: FriendIds(vec!["u2".to_string()]),
            created_at: Utc::now().into(),
            updated_at: None,
        };
        let own = create_test_activity("a1", "u1");
        let friends = create_test_activity("a2", "u2");

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![user]])
            .append_query_results([vec![friends, own]])
            .into_connection();

        let service = service_with(db);
        let feed = service.feed_for("u1").await.unwrap();

        assert_eq!(feed.len(), 2);
    }
}
