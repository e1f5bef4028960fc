//! Wallet domain module
//!
//! Authenticated balance operations on top of the credential store, token
//! service and ledger.

mod service;

pub use service::{WalletError, WalletService};
