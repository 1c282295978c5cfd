//! Database repositories.

pub mod activity;
pub mod friend_request;
pub mod user;
pub mod watchlist;

pub use activity::ActivityRepository;
pub use friend_request::FriendRequestRepository;
pub use user::UserRepository;
pub use watchlist::WatchlistRepository;
