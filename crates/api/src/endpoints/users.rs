//! User endpoints.

use axum::{
    Router,
    extract::{Path, State},
    routing::{get, post},
};
use chrono::{DateTime, FixedOffset};
use cinecircle_common::AppResult;
use cinecircle_core::SyncUserInput;
use cinecircle_db::entities::user;
use serde::Serialize;

use crate::{extractors::Json, response::ApiResponse, state::AppState};

/// User profile response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: String,
    #[serde(rename = "clerkId")]
    pub external_id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub profile_picture: String,
    pub friends: Vec<String>,
    pub created_at: DateTime<FixedOffset>,
}

impl From<user::Model> for UserResponse {
    fn from(user: user::Model) -> Self {
        Self {
            id: user.id,
            external_id: user.external_id,
            first_name: user.first_name,
            last_name: user.last_name,
            email: user.email,
            profile_picture: user.profile_picture,
            friends: user.friends.0,
            created_at: user.created_at,
        }
    }
}

/// Upsert a user record from the identity provider's client-side data.
async fn sync(
    State(state): State<AppState>,
    Json(input): Json<SyncUserInput>,
) -> AppResult<ApiResponse<UserResponse>> {
    let (user, created) = state.identity_service.sync(input).await?;

    let response = UserResponse::from(user);
    Ok(if created {
        ApiResponse::created(response)
    } else {
        ApiResponse::ok(response)
    })
}

/// Get a user's profile.
async fn get_user(
    State(state): State<AppState>,
    Path(external_id): Path<String>,
) -> AppResult<ApiResponse<UserResponse>> {
    let user = state.identity_service.get(&external_id).await?;
    Ok(ApiResponse::ok(user.into()))
}

/// Get a user's friends as full profiles.
async fn get_friends(
    State(state): State<AppState>,
    Path(external_id): Path<String>,
) -> AppResult<ApiResponse<Vec<UserResponse>>> {
    let friends = state.friendship_service.friends_of(&external_id).await?;
    Ok(ApiResponse::ok(friends.into_iter().map(Into::into).collect()))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/sync", post(sync))
        .route("/{external_id}", get(get_user))
        .route("/{external_id}/friends", get(get_friends))
}
