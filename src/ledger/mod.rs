//! Ledger domain module
//!
//! Owns every balance and the append-only transaction log.

mod model;
mod service;

pub use model::*;
pub use service::{has_cent_precision, Ledger, LedgerError};
