//! Request and response models for the wallet API

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::ledger::{Transaction, TransactionKind};

// ============================================================================
// Request DTOs
// ============================================================================

/// Registration request
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(length(min = 1, max = 64))]
    pub username: String,
    #[validate(length(min = 6))]
    pub password: String,
}

/// Login form, OAuth2 password-grant style
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

fn default_spend_description() -> String {
    "General Spend".to_string()
}

/// Spend request
#[derive(Debug, Deserialize)]
pub struct SpendRequest {
    pub amount: Decimal,
    #[serde(default = "default_spend_description")]
    pub description: String,
}

// ============================================================================
// Response DTOs
// ============================================================================

/// Registered user (never includes credentials)
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct RegisteredUser {
    pub username: String,
}

/// Bearer token response
#[derive(Debug, Serialize, Deserialize)]
pub struct AccessTokenResponse {
    pub access_token: String,
    pub token_type: String,
}

impl AccessTokenResponse {
    pub fn bearer(access_token: String) -> Self {
        Self {
            access_token,
            token_type: "bearer".to_string(),
        }
    }
}

/// Wallet balance for the authenticated user
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct BalanceResponse {
    pub user_id: u64,
    pub username: String,
    pub balance: Decimal,
}

/// Transaction as exposed by the debug listing
#[derive(Debug, Serialize)]
pub struct TransactionResponse {
    pub id: u64,
    pub user_id: u64,
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    pub amount: Decimal,
    pub description: String,
    pub item_id: Option<u64>,
    pub timestamp: DateTime<Utc>,
}

impl From<Transaction> for TransactionResponse {
    fn from(tx: Transaction) -> Self {
        Self {
            id: tx.id,
            user_id: tx.user_id,
            kind: tx.kind,
            amount: tx.amount,
            description: tx.description,
            item_id: tx.item_id,
            timestamp: tx.timestamp,
        }
    }
}
