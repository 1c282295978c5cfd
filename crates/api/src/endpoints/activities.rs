//! Activity endpoints.

use axum::{
    Router,
    extract::{Path, State},
    routing::{get, post},
};
use chrono::{DateTime, FixedOffset};
use cinecircle_common::AppResult;
use cinecircle_core::RecordActivityInput;
use cinecircle_db::entities::activity;
use serde::Serialize;

use crate::{extractors::Json, response::ApiResponse, state::AppState};

/// Activity record response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityResponse {
    pub id: String,
    pub user_id: String,
    #[serde(rename = "type")]
    pub activity_type: activity::ActivityType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub movie_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub movie_title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub movie_poster_path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub friend_id: Option<String>,
    pub created_at: DateTime<FixedOffset>,
}

impl From<activity::Model> for ActivityResponse {
    fn from(activity: activity::Model) -> Self {
        Self {
            id: activity.id,
            user_id: activity.user_id,
            activity_type: activity.activity_type,
            movie_id: activity.movie_id,
            movie_title: activity.movie_title,
            movie_poster_path: activity.movie_poster_path,
            rating: activity.rating,
            content: activity.content,
            friend_id: activity.friend_id,
            created_at: activity.created_at,
        }
    }
}

/// Append an activity record.
async fn create(
    State(state): State<AppState>,
    Json(input): Json<RecordActivityInput>,
) -> AppResult<ApiResponse<ActivityResponse>> {
    let activity = state.activity_service.record(input).await?;
    Ok(ApiResponse::created(activity.into()))
}

/// A single user's activities, newest first.
async fn for_user(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> AppResult<ApiResponse<Vec<ActivityResponse>>> {
    let activities = state.activity_service.for_user(&user_id).await?;
    Ok(ApiResponse::ok(
        activities.into_iter().map(Into::into).collect(),
    ))
}

/// Merged feed of a user's own and their friends' activities.
async fn feed(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> AppResult<ApiResponse<Vec<ActivityResponse>>> {
    let activities = state.activity_service.feed_for(&user_id).await?;
    Ok(ApiResponse::ok(
        activities.into_iter().map(Into::into).collect(),
    ))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/create", post(create))
        .route("/feed/{user_id}", get(feed))
        .route("/{user_id}", get(for_user))
}
