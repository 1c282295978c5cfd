//! Friend request endpoints.

use axum::{
    Router,
    extract::{Path, State},
    routing::{get, post},
};
use chrono::{DateTime, FixedOffset};
use cinecircle_common::AppResult;
use cinecircle_core::RequestWithCounterpart;
use cinecircle_db::entities::friend_request;
use serde::{Deserialize, Serialize};

use crate::{
    endpoints::users::UserResponse, extractors::Json, response::ApiResponse, state::AppState,
};

/// Send request payload.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendRequest {
    pub sender_id: String,
    pub receiver_id: String,
}

/// Payload targeting an existing request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestRef {
    pub request_id: String,
}

/// Friend request response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FriendRequestResponse {
    pub id: String,
    pub sender_id: String,
    pub receiver_id: String,
    pub status: String,
    pub created_at: DateTime<FixedOffset>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<FixedOffset>>,
}

impl From<friend_request::Model> for FriendRequestResponse {
    fn from(request: friend_request::Model) -> Self {
        Self {
            id: request.id,
            sender_id: request.sender_id,
            receiver_id: request.receiver_id,
            status: request.status.to_string(),
            created_at: request.created_at,
            updated_at: request.updated_at,
        }
    }
}

/// Friend request with the counterpart user's profile joined in.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestListItem {
    #[serde(flatten)]
    pub request: FriendRequestResponse,
    /// Sender for received requests, receiver for sent ones. Absent when
    /// the counterpart account has since been deleted.
    pub user: Option<UserResponse>,
}

impl From<RequestWithCounterpart> for RequestListItem {
    fn from(item: RequestWithCounterpart) -> Self {
        Self {
            request: item.request.into(),
            user: item.counterpart.map(Into::into),
        }
    }
}

/// Send a friend request.
async fn send(
    State(state): State<AppState>,
    Json(req): Json<SendRequest>,
) -> AppResult<ApiResponse<FriendRequestResponse>> {
    let request = state
        .friendship_service
        .send(&req.sender_id, &req.receiver_id)
        .await?;
    Ok(ApiResponse::created(request.into()))
}

/// Accept a pending friend request.
async fn accept(
    State(state): State<AppState>,
    Json(req): Json<RequestRef>,
) -> AppResult<ApiResponse<FriendRequestResponse>> {
    let request = state.friendship_service.accept(&req.request_id).await?;
    Ok(ApiResponse::ok(request.into()))
}

/// Decline a pending friend request.
async fn decline(
    State(state): State<AppState>,
    Json(req): Json<RequestRef>,
) -> AppResult<ApiResponse<FriendRequestResponse>> {
    let request = state.friendship_service.decline(&req.request_id).await?;
    Ok(ApiResponse::ok(request.into()))
}

/// Cancel (delete) a friend request.
async fn cancel(
    State(state): State<AppState>,
    Json(req): Json<RequestRef>,
) -> AppResult<ApiResponse<()>> {
    state.friendship_service.cancel(&req.request_id).await?;
    Ok(ApiResponse::ok(()))
}

/// Pending requests received by a user.
async fn pending(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> AppResult<ApiResponse<Vec<RequestListItem>>> {
    let requests = state.friendship_service.pending_for(&user_id).await?;
    Ok(ApiResponse::ok(requests.into_iter().map(Into::into).collect()))
}

/// Requests sent by a user, any status.
async fn sent(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> AppResult<ApiResponse<Vec<RequestListItem>>> {
    let requests = state.friendship_service.sent_by(&user_id).await?;
    Ok(ApiResponse::ok(requests.into_iter().map(Into::into).collect()))
}

/// A user's friends as full profiles.
async fn friends(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> AppResult<ApiResponse<Vec<UserResponse>>> {
    let friends = state.friendship_service.friends_of(&user_id).await?;
    Ok(ApiResponse::ok(friends.into_iter().map(Into::into).collect()))
}

/// All known users, for friend discovery.
async fn all_users(State(state): State<AppState>) -> AppResult<ApiResponse<Vec<UserResponse>>> {
    let users = state.friendship_service.all_users().await?;
    Ok(ApiResponse::ok(users.into_iter().map(Into::into).collect()))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/send", post(send))
        .route("/accept", post(accept))
        .route("/decline", post(decline))
        .route("/cancel", post(cancel))
        .route("/pending/{user_id}", get(pending))
        .route("/sent/{user_id}", get(sent))
        .route("/friends/{user_id}", get(friends))
        .route("/users", get(all_users))
}
