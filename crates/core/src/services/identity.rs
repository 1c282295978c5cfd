//! Identity synchronization service.
//!
//! Mirrors identity-provider accounts into the local user table. Two entry
//! points converge on the same upsert: the client-driven sync endpoint and
//! the provider's webhook events.

use cinecircle_common::{AppResult, IdGenerator};
use cinecircle_db::{
    entities::user,
    repositories::UserRepository,
};
use sea_orm::Set;
use serde::Deserialize;
use validator::Validate;

/// Profile fields pushed by the client or the identity provider.
///
/// Absent or empty fields leave the stored value untouched on update.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SyncUserInput {
    #[serde(rename = "clerkId")]
    #[validate(length(min = 1, message = "External ID is required"))]
    pub external_id: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub profile_picture: Option<String>,
}

/// What a sync or webhook event did to the local record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncOutcome {
    Created,
    Updated,
    Deleted,
    Ignored,
}

/// Identity-provider webhook event payload.
#[derive(Debug, Clone, Deserialize)]
pub struct IdentityEvent {
    #[serde(rename = "type")]
    pub event_type: String,
    pub data: IdentityEventData,
}

#[derive(Debug, Clone, Deserialize)]
pub struct IdentityEventData {
    pub id: String,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub email_addresses: Vec<EmailAddress>,
    #[serde(default)]
    pub image_url: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EmailAddress {
    pub email_address: String,
}

/// Identity service for business logic.
#[derive(Clone)]
pub struct IdentityService {
    user_repo: UserRepository,
    id_gen: IdGenerator,
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

impl IdentityService {
    /// Create a new identity service.
    #[must_use]
    pub fn new(user_repo: UserRepository) -> Self {
        Self {
            user_repo,
            id_gen: IdGenerator::new(),
        }
    }

    /// Upsert a user record keyed by external ID.
    ///
    /// Returns the stored record and whether it was newly created. Empty
    /// incoming fields never clobber stored values, so a sparse webhook
    /// payload landing after a full client sync is harmless.
    pub async fn sync(&self, input: SyncUserInput) -> AppResult<(user::Model, bool)> {
        input.validate()?;

        let existing = self.user_repo.find_by_external_id(&input.external_id).await?;

        match existing {
            Some(user) => {
                let mut active: user::ActiveModel = user.into();
                if let Some(first_name) = non_empty(input.first_name) {
                    active.first_name = Set(first_name);
                }
                if let Some(last_name) = non_empty(input.last_name) {
                    active.last_name = Set(last_name);
                }
                if let Some(email) = non_empty(input.email) {
                    active.email = Set(email);
                }
                if let Some(picture) = non_empty(input.profile_picture) {
                    active.profile_picture = Set(picture);
                }
                active.updated_at = Set(Some(chrono::Utc::now().into()));

                let updated = self.user_repo.update(active).await?;
                Ok((updated, false))
            }
            None => {
                let model = user::ActiveModel {
                    id: Set(self.id_gen.generate()),
                    external_id: Set(input.external_id.clone()),
                    first_name: Set(non_empty(input.first_name).unwrap_or_default()),
                    last_name: Set(non_empty(input.last_name).unwrap_or_default()),
                    email: Set(non_empty(input.email).unwrap_or_default()),
                    profile_picture: Set(non_empty(input.profile_picture).unwrap_or_default()),
                    ..Default::default()
                };

                // The unique index on external_id backstops two syncs racing
                // past the lookup; the loser gets a Conflict.
                let created = self.user_repo.create(model).await?;
                tracing::info!(external_id = %created.external_id, "User created");
                Ok((created, true))
            }
        }
    }

    /// Look up a user by external ID.
    pub async fn get(&self, external_id: &str) -> AppResult<user::Model> {
        self.user_repo.get_by_external_id(external_id).await
    }

    /// Apply a verified identity-provider event.
    ///
    /// `user.created` and `user.updated` both run the upsert, so replayed or
    /// reordered deliveries converge on the same record. `user.deleted`
    /// removes the local row without cascading; dangling references in
    /// friend requests and activities are tolerated downstream.
    pub async fn apply_event(&self, event: IdentityEvent) -> AppResult<SyncOutcome> {
        match event.event_type.as_str() {
            "user.created" | "user.updated" => {
                let input = SyncUserInput {
                    external_id: event.data.id,
                    first_name: event.data.first_name,
                    last_name: event.data.last_name,
                    email: event
                        .data
                        .email_addresses
                        .into_iter()
                        .next()
                        .map(|e| e.email_address),
                    profile_picture: event.data.image_url,
                };

                let (_, created) = self.sync(input).await?;
                Ok(if created {
                    SyncOutcome::Created
                } else {
                    SyncOutcome::Updated
                })
            }
            "user.deleted" => {
                let deleted = self.user_repo.delete_by_external_id(&event.data.id).await?;
                match deleted {
                    Some(user) => {
                        tracing::info!(external_id = %user.external_id, "User deleted");
                        Ok(SyncOutcome::Deleted)
                    }
                    None => Ok(SyncOutcome::Ignored),
                }
            }
            other => {
                tracing::debug!(event_type = other, "Ignoring unhandled identity event");
                Ok(SyncOutcome::Ignored)
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::Utc;
    use cinecircle_common::AppError;
    use cinecircle_db::entities::user::FriendIds;
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};
    use std::sync::Arc;

    fn create_test_user(external_id: &str) -> user::Model {
        user::Model {
            id: format!("id_{external_id}"),
            external_id: external_id.to_string(),
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            email: "ada@example.com".to_string(),
            profile_picture: "https://img.example.com/ada.png".to_string(),
            friends: FriendIds::default(),
            created_at: Utc::now().into(),
            updated_at: None,
        }
    }

    fn service_with(db: sea_orm::DatabaseConnection) -> IdentityService {
        IdentityService::new(UserRepository::new(Arc::new(db)))
    }

    fn sync_input(external_id: &str) -> SyncUserInput {
        SyncUserInput {
            external_id: external_id.to_string(),
            first_name: Some("Ada".to_string()),
            last_name: Some("Lovelace".to_string()),
            email: Some("ada@example.com".to_string()),
            profile_picture: None,
        }
    }

    #[tokio::test]
    async fn test_sync_empty_external_id_returns_validation_error() {
        let service = service_with(
            MockDatabase::new(DatabaseBackend::Postgres).into_connection(),
        );

        let result = service.sync(sync_input("")).await;
        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn test_sync_creates_new_user() {
        let created = create_test_user("clerk_u1");

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<user::Model>::new()])
            .append_query_results([vec![created]])
            .append_exec_results([MockExecResult {
                last_insert_id: 0,
                rows_affected: 1,
            }])
            .into_connection();

        let service = service_with(db);
        let (user, was_created) = service.sync(sync_input("clerk_u1")).await.unwrap();

        assert!(was_created);
        assert_eq!(user.external_id, "clerk_u1");
    }

    #[tokio::test]
    async fn test_sync_updates_existing_user() {
        let existing = create_test_user("clerk_u1");
        let mut updated = existing.clone();
        updated.first_name = "Augusta".to_string();

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![existing], vec![updated]])
            .append_exec_results([MockExecResult {
                last_insert_id: 0,
                rows_affected: 1,
            }])
            .into_connection();

        let service = service_with(db);

        let mut input = sync_input("clerk_u1");
        input.first_name = Some("Augusta".to_string());
        let (user, was_created) = service.sync(input).await.unwrap();

        assert!(!was_created);
        assert_eq!(user.first_name, "Augusta");
    }

    #[tokio::test]
    async fn test_apply_event_deleted_missing_user_is_ignored() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<user::Model>::new()])
            .into_connection();

        let service = service_with(db);
        let event = IdentityEvent {
            event_type: "user.deleted".to_string(),
            data: IdentityEventData {
                id: "clerk_gone".to_string(),
                first_name: None,
                last_name: None,
                email_addresses: vec![],
                image_url: None,
            },
        };

        let outcome = service.apply_event(event).await.unwrap();
        assert_eq!(outcome, SyncOutcome::Ignored);
    }

    #[tokio::test]
    async fn test_apply_event_unknown_type_is_ignored() {
        let service = service_with(
            MockDatabase::new(DatabaseBackend::Postgres).into_connection(),
        );

        let event = IdentityEvent {
            event_type: "session.created".to_string(),
            data: IdentityEventData {
                id: "clerk_u1".to_string(),
                first_name: None,
                last_name: None,
                email_addresses: vec![],
                image_url: None,
            },
        };

        let outcome = service.apply_event(event).await.unwrap();
        assert_eq!(outcome, SyncOutcome::Ignored);
    }

    #[tokio::test]
    async fn test_apply_event_created_takes_first_email() {
        let created = create_test_user("clerk_u1");

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<user::Model>::new()])
            .append_query_results([vec![created]])
            .append_exec_results([MockExecResult {
                last_insert_id: 0,
                rows_affected: 1,
            }])
            .into_connection();

        let service = service_with(db);
        let event = IdentityEvent {
            event_type: "user.created".to_string(),
            data: IdentityEventData {
                id: "clerk_u1".to_string(),
                first_name: Some("Ada".to_string()),
                last_name: Some("Lovelace".to_string()),
                email_addresses: vec![
                    EmailAddress {
                        email_address: "ada@example.com".to_string(),
                    },
                    EmailAddress {
                        email_address: "secondary@example.com".to_string(),
                    },
                ],
                image_url: None,
            },
        };

        let outcome = service.apply_event(event).await.unwrap();
        assert_eq!(outcome, SyncOutcome::Created);
    }
}
