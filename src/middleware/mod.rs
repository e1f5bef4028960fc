//! Middleware for the wallet API

pub mod auth;
mod tracing;

pub use auth::AuthenticatedUser;
pub use tracing::request_tracing;
