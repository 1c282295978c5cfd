//! API endpoints.

mod activities;
mod friend_requests;
mod users;
mod watchlist;
mod webhooks;

use axum::Router;

use crate::state::AppState;

/// Create the API router.
pub fn router() -> Router<AppState> {
    Router::new()
        .nest("/friend-requests", friend_requests::router())
        .nest("/users", users::router())
        .nest("/activities", activities::router())
        .nest("/watchlist", watchlist::router())
        .nest("/webhooks", webhooks::router())
}
