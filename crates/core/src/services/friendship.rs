//! Friendship service.
//!
//! Owns the friend-request state machine (pending → accepted/rejected,
//! cancellation deletes) and the materialization of accepted requests into
//! both users' denormalized friends sets.

use std::collections::HashMap;
use std::sync::Arc;

use cinecircle_common::{AppError, AppResult, IdGenerator};
use cinecircle_db::{
    entities::{
        FriendRequest, User, friend_request,
        friend_request::{RequestStatus, pair_key},
        user,
    },
    repositories::{FriendRequestRepository, UserRepository},
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr, EntityTrait,
    QueryFilter, Set, TransactionTrait,
};

fn db_err(e: DbErr) -> AppError {
    AppError::Database(e.to_string())
}

/// A friend request enriched with the counterpart user's profile.
#[derive(Debug, Clone)]
pub struct RequestWithCounterpart {
    /// The ledger record.
    pub request: friend_request::Model,
    /// The other party's user record, if it still exists.
    pub counterpart: Option<user::Model>,
}

/// Add one user to another's friends set if absent.
async fn add_friend<C: ConnectionTrait>(conn: &C, owner: &str, friend: &str) -> AppResult<()> {
    let owner_user = User::find()
        .filter(user::Column::ExternalId.eq(owner))
        .one(conn)
        .await
        .map_err(db_err)?
        .ok_or_else(|| AppError::UserNotFound(owner.to_string()))?;

    let mut friends = owner_user.friends.clone();
    if friends.insert(friend) {
        let mut active: user::ActiveModel = owner_user.into();
        active.friends = Set(friends);
        active.updated_at = Set(Some(chrono::Utc::now().into()));
        active.update(conn).await.map_err(db_err)?;
    }

    Ok(())
}

/// Materialize a friendship: add each user to the other's friends set.
///
/// Idempotent add-to-set on both sides, so it is safe to re-run as a repair
/// step. Generic over [`ConnectionTrait`] so the accept path can run it
/// inside the same transaction as the status flip.
pub async fn materialize_friendship<C: ConnectionTrait>(
    conn: &C,
    a: &str,
    b: &str,
) -> AppResult<()> {
    add_friend(conn, a, b).await?;
    add_friend(conn, b, a).await
}

/// Friendship service for business logic.
#[derive(Clone)]
pub struct FriendshipService {
    db: Arc<DatabaseConnection>,
    request_repo: FriendRequestRepository,
    user_repo: UserRepository,
    id_gen: IdGenerator,
}

impl FriendshipService {
    /// Create a new friendship service.
    #[must_use]
    pub fn new(
        db: Arc<DatabaseConnection>,
        request_repo: FriendRequestRepository,
        user_repo: UserRepository,
    ) -> Self {
        Self {
            db,
            request_repo,
            user_repo,
            id_gen: IdGenerator::new(),
        }
    }

    /// Send a friend request.
    pub async fn send(
        &self,
        sender_id: &str,
        receiver_id: &str,
    ) -> AppResult<friend_request::Model> {
        if sender_id.is_empty() {
            return Err(AppError::Validation("Sender ID is required".to_string()));
        }
        if receiver_id.is_empty() {
            return Err(AppError::Validation("Receiver ID is required".to_string()));
        }

        // Can't friend yourself
        if sender_id == receiver_id {
            return Err(AppError::BadRequest(
                "You cannot send a friend request to yourself".to_string(),
            ));
        }

        // Both users must exist
        let sender = self.user_repo.get_by_external_id(sender_id).await?;
        let _receiver = self.user_repo.get_by_external_id(receiver_id).await?;

        // Check if they are already friends
        if sender.friends.contains(receiver_id) {
            return Err(AppError::BadRequest(
                "Users are already friends".to_string(),
            ));
        }

        // Check for an existing request in either direction. The caller is
        // told the current status so the client can render it.
        if let Some(existing) = self.request_repo.find_by_pair(sender_id, receiver_id).await? {
            return Err(AppError::BadRequest(format!(
                "A friend request already exists between these users (status: {})",
                existing.status
            )));
        }

        // The pair_key unique index backstops two sends racing past the
        // existence check; the loser gets a Conflict from the repository.
        let model = friend_request::ActiveModel {
            id: Set(self.id_gen.generate()),
            sender_id: Set(sender_id.to_string()),
            receiver_id: Set(receiver_id.to_string()),
            pair_key: Set(pair_key(sender_id, receiver_id)),
            status: Set(RequestStatus::Pending),
            ..Default::default()
        };

        let request = self.request_repo.create(model).await?;
        tracing::debug!(sender_id, receiver_id, request_id = %request.id, "Friend request sent");
        Ok(request)
    }

    /// Accept a friend request.
    ///
    /// Flips the status to `accepted` and materializes the friendship on
    /// both sides in a single transaction. Not idempotent: accepting an
    /// already-accepted request is an error.
    pub async fn accept(&self, request_id: &str) -> AppResult<friend_request::Model> {
        let txn = self.db.begin().await.map_err(db_err)?;

        let request = FriendRequest::find_by_id(request_id)
            .one(&txn)
            .await
            .map_err(db_err)?
            .ok_or_else(|| AppError::NotFound("Friend request not found".to_string()))?;

        if request.status != RequestStatus::Pending {
            return Err(AppError::BadRequest(format!(
                "Request already {}",
                request.status
            )));
        }

        let sender_id = request.sender_id.clone();
        let receiver_id = request.receiver_id.clone();

        let mut active: friend_request::ActiveModel = request.into();
        active.status = Set(RequestStatus::Accepted);
        active.updated_at = Set(Some(chrono::Utc::now().into()));
        let updated = active.update(&txn).await.map_err(db_err)?;

        materialize_friendship(&txn, &sender_id, &receiver_id).await?;

        txn.commit().await.map_err(db_err)?;

        tracing::debug!(%sender_id, %receiver_id, request_id, "Friend request accepted");
        Ok(updated)
    }

    /// Decline a friend request. Terminal: the record stays as `rejected`.
    pub async fn decline(&self, request_id: &str) -> AppResult<friend_request::Model> {
        let request = self
            .request_repo
            .find_by_id(request_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Friend request not found".to_string()))?;

        if request.status != RequestStatus::Pending {
            return Err(AppError::BadRequest(format!(
                "Request already {}",
                request.status
            )));
        }

        let mut active: friend_request::ActiveModel = request.into();
        active.status = Set(RequestStatus::Rejected);
        active.updated_at = Set(Some(chrono::Utc::now().into()));
        self.request_repo.update(active).await
    }

    /// Cancel a friend request (hard delete).
    ///
    /// Conceptually only pending requests should be cancellable, but any
    /// found record is deleted; the pair is then free for a new request.
    pub async fn cancel(&self, request_id: &str) -> AppResult<()> {
        if !self.request_repo.delete(request_id).await? {
            return Err(AppError::NotFound(
                "Friend request not found".to_string(),
            ));
        }
        Ok(())
    }

    /// Pending requests received by a user, enriched with sender profiles.
    pub async fn pending_for(&self, user_id: &str) -> AppResult<Vec<RequestWithCounterpart>> {
        let requests = self.request_repo.find_pending_for(user_id).await?;
        self.enrich(requests, |r| r.sender_id.clone()).await
    }

    /// Requests sent by a user (any status), enriched with receiver profiles.
    pub async fn sent_by(&self, user_id: &str) -> AppResult<Vec<RequestWithCounterpart>> {
        let requests = self.request_repo.find_sent_by(user_id).await?;
        self.enrich(requests, |r| r.receiver_id.clone()).await
    }

    /// Resolve a user's friends set to full user records.
    pub async fn friends_of(&self, user_id: &str) -> AppResult<Vec<user::Model>> {
        let user = self.user_repo.get_by_external_id(user_id).await?;

        if user.friends.is_empty() {
            return Ok(vec![]);
        }

        self.user_repo.find_by_external_ids(&user.friends.0).await
    }

    /// All known users.
    pub async fn all_users(&self) -> AppResult<Vec<user::Model>> {
        self.user_repo.find_all().await
    }

    /// Join counterpart profiles onto requests with one batched lookup.
    async fn enrich<F>(
        &self,
        requests: Vec<friend_request::Model>,
        counterpart_id: F,
    ) -> AppResult<Vec<RequestWithCounterpart>>
    where
        F: Fn(&friend_request::Model) -> String,
    {
        let mut ids: Vec<String> = requests.iter().map(&counterpart_id).collect();
        ids.sort_unstable();
        ids.dedup();

        let users = self.user_repo.find_by_external_ids(&ids).await?;
        let by_external_id: HashMap<String, user::Model> = users
            .into_iter()
            .map(|u| (u.external_id.clone(), u))
            .collect();

        Ok(requests
            .into_iter()
            .map(|request| {
                let counterpart = by_external_id.get(&counterpart_id(&request)).cloned();
                RequestWithCounterpart {
                    request,
                    counterpart,
                }
            })
            .collect())
    }
}
