//! Shared application state.

use cinecircle_core::{ActivityService, FriendshipService, IdentityService, WatchlistService};

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub friendship_service: FriendshipService,
    pub identity_service: IdentityService,
    pub activity_service: ActivityService,
    pub watchlist_service: WatchlistService,
    /// Shared secret for webhook verification. Deliveries are rejected
    /// outright when unset.
    pub webhook_secret: Option<String>,
    /// Replay window for webhook timestamps, in seconds.
    pub webhook_tolerance_secs: i64,
}
