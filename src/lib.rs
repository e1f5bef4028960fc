//! Wallet Server Library
//!
//! Authenticated wallet service: users register, log in for a bearer token,
//! and spend a balance directly or by buying catalog items.
//!
//! The core is three state objects composed by [`wallet::WalletService`]:
//! the [`auth::CredentialStore`], the stateless [`auth::TokenService`] and
//! the [`ledger::Ledger`]. Everything else is the axum surface around it.

pub mod auth;
pub mod catalog;
pub mod config;
pub mod error;
pub mod handlers;
pub mod ledger;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod state;
pub mod wallet;
