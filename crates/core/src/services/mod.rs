//! Business logic services.

#![allow(missing_docs)]

pub mod activity;
pub mod friendship;
pub mod identity;
pub mod watchlist;

pub use activity::{ActivityService, RecordActivityInput};
pub use friendship::{FriendshipService, RequestWithCounterpart, materialize_friendship};
pub use identity::{IdentityEvent, IdentityService, SyncOutcome, SyncUserInput};
pub use watchlist::{AddWatchlistInput, WatchlistService};
