//! Ledger service - balances and the append-only transaction log

use std::collections::HashMap;

use chrono::Utc;
use rust_decimal::Decimal;
use thiserror::Error;
use tokio::sync::RwLock;

use super::model::{Memo, Transaction};

/// Smallest currency unit is the cent
const MAX_AMOUNT_SCALE: u32 = 2;

/// Ledger errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LedgerError {
    #[error("Invalid amount: {0}. Amounts must be positive with at most two decimal places")]
    InvalidAmount(Decimal),

    #[error("Insufficient funds: balance {balance}, requested {requested}")]
    InsufficientFunds { balance: Decimal, requested: Decimal },

    #[error("Unknown user: {0}")]
    UnknownUser(u64),

    #[error("Account already initialized for user {0}")]
    AlreadyInitialized(u64),
}

#[derive(Default)]
struct Book {
    balances: HashMap<u64, Decimal>,
    transactions: Vec<Transaction>,
}

impl Book {
    fn append(&mut self, user_id: u64, signed_amount: Decimal, memo: Memo) {
        let id = self.transactions.len() as u64 + 1;
        self.transactions.push(Transaction {
            id,
            user_id,
            kind: memo.kind,
            amount: signed_amount,
            description: memo.description,
            item_id: memo.item_id,
            timestamp: Utc::now(),
        });
    }
}

/// Single authority for balance mutation
///
/// One lock guards both the balances and the log, so a check-then-mutate and
/// its log entry are applied as one step and readers never see one without
/// the other.
#[derive(Default)]
pub struct Ledger {
    book: RwLock<Book>,
}

/// Whole cents only
pub fn has_cent_precision(amount: Decimal) -> bool {
    amount.normalize().scale() <= MAX_AMOUNT_SCALE
}

fn validate_amount(amount: Decimal) -> Result<(), LedgerError> {
    if amount <= Decimal::ZERO || !has_cent_precision(amount) {
        return Err(LedgerError::InvalidAmount(amount));
    }
    Ok(())
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open an account, crediting the starting balance as a `Register` entry
    pub async fn initialize(
        &self,
        user_id: u64,
        starting_balance: Decimal,
    ) -> Result<Decimal, LedgerError> {
        if starting_balance < Decimal::ZERO || !has_cent_precision(starting_balance) {
            return Err(LedgerError::InvalidAmount(starting_balance));
        }

        let mut book = self.book.write().await;
        if book.balances.contains_key(&user_id) {
            return Err(LedgerError::AlreadyInitialized(user_id));
        }

        book.balances.insert(user_id, starting_balance);
        if starting_balance > Decimal::ZERO {
            book.append(user_id, starting_balance, Memo::opening());
        }

        tracing::debug!(user_id, balance = %starting_balance, "Ledger account opened");
        Ok(starting_balance)
    }

    pub async fn balance_of(&self, user_id: u64) -> Result<Decimal, LedgerError> {
        self.book
            .read()
            .await
            .balances
            .get(&user_id)
            .copied()
            .ok_or(LedgerError::UnknownUser(user_id))
    }

    /// Decrease a balance; rejected without side effects if it would go negative
    pub async fn debit(
        &self,
        user_id: u64,
        amount: Decimal,
        memo: Memo,
    ) -> Result<Decimal, LedgerError> {
        validate_amount(amount)?;

        let mut book = self.book.write().await;
        let balance = *book
            .balances
            .get(&user_id)
            .ok_or(LedgerError::UnknownUser(user_id))?;

        if amount > balance {
            tracing::info!(
                user_id,
                balance = %balance,
                requested = %amount,
                "Debit rejected: insufficient funds"
            );
            return Err(LedgerError::InsufficientFunds {
                balance,
                requested: amount,
            });
        }

        let new_balance = balance - amount;
        book.balances.insert(user_id, new_balance);
        book.append(user_id, -amount, memo);

        tracing::info!(user_id, amount = %amount, balance = %new_balance, "Debit applied");
        Ok(new_balance)
    }

    pub async fn credit(
        &self,
        user_id: u64,
        amount: Decimal,
        memo: Memo,
    ) -> Result<Decimal, LedgerError> {
        validate_amount(amount)?;

        let mut book = self.book.write().await;
        let balance = book
            .balances
            .get_mut(&user_id)
            .ok_or(LedgerError::UnknownUser(user_id))?;

        let new_balance = balance
            .checked_add(amount)
            .ok_or(LedgerError::InvalidAmount(amount))?;
        *balance = new_balance;
        book.append(user_id, amount, memo);

        tracing::info!(user_id, amount = %amount, balance = %new_balance, "Credit applied");
        Ok(new_balance)
    }

    /// Full log in append order
    pub async fn history(&self) -> Vec<Transaction> {
        self.book.read().await.transactions.clone()
    }

    /// One user's entries in append order; empty for unknown users
    pub async fn history_of(&self, user_id: u64) -> Vec<Transaction> {
        self.book
            .read()
            .await
            .transactions
            .iter()
            .filter(|tx| tx.user_id == user_id)
            .cloned()
            .collect()
    }
}
