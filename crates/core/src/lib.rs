//! Core business logic for cinecircle.
//!
//! Services in this crate sit between the HTTP layer and the repositories:
//! they hold the business rules (friend-request state machine, identity
//! sync, activity feeds, watchlists) and return [`cinecircle_common::AppError`]
//! values that the API layer maps to responses.

pub mod services;

pub use services::*;
