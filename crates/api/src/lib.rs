//! HTTP API layer for CineCircle.
//!
//! This crate provides the REST API:
//!
//! - **Endpoints**: friend requests, users, activities, watchlists, webhooks
//! - **Extractors**: JSON body handling with 400 on malformed input
//! - **Response**: uniform JSON success envelope
//!
//! Built on Axum 0.8 with Tower middleware stack.

pub mod endpoints;
pub mod extractors;
pub mod response;
pub mod state;

pub use endpoints::router;
pub use state::AppState;
