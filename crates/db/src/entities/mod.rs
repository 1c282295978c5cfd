//! Database entities.

pub mod activity;
pub mod friend_request;
pub mod user;
pub mod watchlist_item;

pub use activity::Entity as Activity;
pub use friend_request::Entity as FriendRequest;
pub use user::Entity as User;
pub use watchlist_item::Entity as WatchlistItem;
