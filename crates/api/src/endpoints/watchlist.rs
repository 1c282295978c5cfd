//! Watchlist endpoints.

use axum::{
    Router,
    extract::{Path, State},
    routing::{delete, get, post},
};
use chrono::{DateTime, FixedOffset};
use cinecircle_common::AppResult;
use cinecircle_core::AddWatchlistInput;
use cinecircle_db::entities::watchlist_item;
use serde::{Deserialize, Serialize};

use crate::{extractors::Json, response::ApiResponse, state::AppState};

/// Watchlist entry response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WatchlistItemResponse {
    pub id: String,
    pub user_id: String,
    pub movie_id: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub poster_path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub release_date: Option<String>,
    pub added_at: DateTime<FixedOffset>,
}

impl From<watchlist_item::Model> for WatchlistItemResponse {
    fn from(item: watchlist_item::Model) -> Self {
        Self {
            id: item.id,
            user_id: item.user_id,
            movie_id: item.movie_id,
            title: item.title,
            poster_path: item.poster_path,
            release_date: item.release_date,
            added_at: item.added_at,
        }
    }
}

/// Remove payload.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoveRequest {
    pub user_id: String,
    pub movie_id: String,
}

/// A user's watchlist, oldest first.
async fn list(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> AppResult<ApiResponse<Vec<WatchlistItemResponse>>> {
    let items = state.watchlist_service.list(&user_id).await?;
    Ok(ApiResponse::ok(items.into_iter().map(Into::into).collect()))
}

/// Add a movie. Returns the updated list.
async fn add(
    State(state): State<AppState>,
    Json(input): Json<AddWatchlistInput>,
) -> AppResult<ApiResponse<Vec<WatchlistItemResponse>>> {
    let items = state.watchlist_service.add(input).await?;
    Ok(ApiResponse::created(
        items.into_iter().map(Into::into).collect(),
    ))
}

/// Remove a movie. Returns the updated list.
async fn remove(
    State(state): State<AppState>,
    Json(req): Json<RemoveRequest>,
) -> AppResult<ApiResponse<Vec<WatchlistItemResponse>>> {
    let items = state
        .watchlist_service
        .remove(&req.user_id, &req.movie_id)
        .await?;
    Ok(ApiResponse::ok(items.into_iter().map(Into::into).collect()))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/add", post(add))
        .route("/remove", delete(remove))
        .route("/{user_id}", get(list))
}
