//! Common utilities and shared types for cinecircle.
//!
//! This crate provides foundational components used across all cinecircle crates:
//!
//! - **Configuration**: Application settings via [`Config`]
//! - **Error handling**: Unified error types via [`AppError`] and [`AppResult`]
//! - **ID Generation**: ULID-based unique identifiers via [`IdGenerator`]
//! - **Webhook signatures**: HMAC verification of identity-provider webhooks
//!
//! # Example
//!
//! ```no_run
//! use cinecircle_common::{Config, IdGenerator, AppResult};
//!
//! fn example() -> AppResult<()> {
//!     let config = Config::load()?;
//!     let id_gen = IdGenerator::new();
//!     let id = id_gen.generate();
//!     println!("Generated ID: {}", id);
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod id;
pub mod webhook_signature;

pub use config::Config;
pub use error::{AppError, AppResult};
pub use id::IdGenerator;
pub use webhook_signature::{WebhookSignature, sign_webhook, verify_webhook};
