//! Ledger data models

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Business reason for a ledger entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TransactionKind {
    /// Opening credit granted at registration
    Register,
    /// Arbitrary spend
    Spend,
    /// Catalog purchase
    Buy,
}

/// Immutable ledger entry
///
/// `amount` is signed: credits are positive, debits negative.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Transaction {
    pub id: u64,
    pub user_id: u64,
    pub kind: TransactionKind,
    pub amount: Decimal,
    pub description: String,
    pub item_id: Option<u64>,
    pub timestamp: DateTime<Utc>,
}

impl Transaction {
    pub fn is_debit(&self) -> bool {
        self.amount.is_sign_negative()
    }
}

/// What a debit or credit is for
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Memo {
    pub kind: TransactionKind,
    pub description: String,
    pub item_id: Option<u64>,
}

impl Memo {
    pub fn opening() -> Self {
        Self {
            kind: TransactionKind::Register,
            description: "Initial Wallet Setup".to_string(),
            item_id: None,
        }
    }

    pub fn spend(description: impl Into<String>) -> Self {
        Self {
            kind: TransactionKind::Spend,
            description: description.into(),
            item_id: None,
        }
    }

    pub fn purchase(item_id: u64, item_name: impl Into<String>) -> Self {
        Self {
            kind: TransactionKind::Buy,
            description: item_name.into(),
            item_id: Some(item_id),
        }
    }
}
