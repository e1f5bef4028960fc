//! API handlers for the wallet server

pub mod admin;
pub mod auth;
pub mod items;
pub mod wallet;

// Re-export AuthenticatedUser from middleware for handler use
pub use crate::middleware::auth::AuthenticatedUser;
