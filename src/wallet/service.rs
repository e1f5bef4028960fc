//! Wallet service - authenticated balance queries, spends and purchases

use rust_decimal::Decimal;
use thiserror::Error;

use crate::auth::{CredentialError, CredentialStore, Identity, PublicUser, TokenError, TokenService};
use crate::catalog::{Item, ItemCatalog};
use crate::ledger::{Ledger, LedgerError, Memo, Transaction};
use crate::models::{AccessTokenResponse, BalanceResponse, RegisteredUser};

/// Errors surfaced to the HTTP layer
#[derive(Error, Debug, Clone, PartialEq)]
pub enum WalletError {
    #[error("Username already registered: {0}")]
    DuplicateUsername(String),

    #[error("Incorrect username or password")]
    AuthenticationFailure,

    #[error(transparent)]
    Token(#[from] TokenError),

    #[error("Invalid amount: {0}. Amounts must be positive with at most two decimal places")]
    InvalidAmount(Decimal),

    #[error("Insufficient funds in wallet: balance {balance}, requested {requested}")]
    InsufficientFunds { balance: Decimal, requested: Decimal },

    #[error("Unknown user: {0}")]
    UnknownUser(u64),

    #[error("Item with ID {0} not found")]
    ItemNotFound(u64),

    #[error("Account already initialized for user {0}")]
    AlreadyInitialized(u64),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<CredentialError> for WalletError {
    fn from(e: CredentialError) -> Self {
        match e {
            CredentialError::DuplicateUsername(name) => WalletError::DuplicateUsername(name),
            CredentialError::AuthenticationFailure => WalletError::AuthenticationFailure,
            CredentialError::Internal(msg) => WalletError::Internal(msg),
        }
    }
}

impl From<LedgerError> for WalletError {
    fn from(e: LedgerError) -> Self {
        match e {
            LedgerError::InvalidAmount(amount) => WalletError::InvalidAmount(amount),
            LedgerError::InsufficientFunds { balance, requested } => {
                WalletError::InsufficientFunds { balance, requested }
            }
            LedgerError::UnknownUser(id) => WalletError::UnknownUser(id),
            LedgerError::AlreadyInitialized(id) => WalletError::AlreadyInitialized(id),
        }
    }
}

/// Orchestrates credentials, tokens and the ledger
pub struct WalletService {
    credentials: CredentialStore,
    tokens: TokenService,
    ledger: Ledger,
    catalog: ItemCatalog,
    starting_balance: Decimal,
}

impl WalletService {
    /// Create a new WalletService
    pub fn new(
        credentials: CredentialStore,
        tokens: TokenService,
        ledger: Ledger,
        catalog: ItemCatalog,
        starting_balance: Decimal,
    ) -> Self {
        Self {
            credentials,
            tokens,
            ledger,
            catalog,
            starting_balance,
        }
    }

    /// Register a user and open their wallet with the starting balance
    pub async fn register(
        &self,
        username: &str,
        password: &str,
    ) -> Result<RegisteredUser, WalletError> {
        let user = self.credentials.register(username, password).await?;

        self.ledger
            .initialize(user.id, self.starting_balance)
            .await
            .map_err(|e| {
                tracing::error!(user_id = user.id, error = %e, "Failed to open wallet for new user");
                WalletError::from(e)
            })?;

        tracing::info!(user_id = user.id, username = %user.username, "User registered");

        Ok(RegisteredUser {
            username: user.username,
        })
    }

    /// Exchange credentials for a bearer token
    pub async fn login(
        &self,
        username: &str,
        password: &str,
    ) -> Result<AccessTokenResponse, WalletError> {
        let user = self
            .credentials
            .verify(username, password)
            .await
            .map_err(|e| {
                if matches!(e, CredentialError::AuthenticationFailure) {
                    tracing::warn!(username = %username, "Login failed");
                }
                WalletError::from(e)
            })?;

        let token = self
            .tokens
            .issue(&user)
            .map_err(|e| WalletError::Internal(format!("Token issuance failed: {}", e)))?;

        tracing::info!(user_id = user.id, "Login succeeded");
        Ok(AccessTokenResponse::bearer(token))
    }

    /// Resolve a bearer token to the identity it was issued for
    pub fn authenticate(&self, token: &str) -> Result<Identity, WalletError> {
        Ok(self.tokens.validate(token)?)
    }

    pub async fn get_balance(&self, token: &str) -> Result<BalanceResponse, WalletError> {
        let identity = self.authenticate(token)?;
        self.balance_for(&identity).await
    }

    pub async fn spend(
        &self,
        token: &str,
        amount: Decimal,
        description: &str,
    ) -> Result<BalanceResponse, WalletError> {
        let identity = self.authenticate(token)?;
        self.spend_for(&identity, amount, description).await
    }

    pub async fn buy_item(&self, token: &str, item_id: u64) -> Result<BalanceResponse, WalletError> {
        let identity = self.authenticate(token)?;
        self.buy_item_for(&identity, item_id).await
    }

    /// Balance of an already-authenticated identity
    pub async fn balance_for(&self, identity: &Identity) -> Result<BalanceResponse, WalletError> {
        let balance = self.ledger.balance_of(identity.user_id).await?;
        Ok(snapshot(identity, balance))
    }

    pub async fn spend_for(
        &self,
        identity: &Identity,
        amount: Decimal,
        description: &str,
    ) -> Result<BalanceResponse, WalletError> {
        let balance = self
            .ledger
            .debit(identity.user_id, amount, Memo::spend(description))
            .await?;
        Ok(snapshot(identity, balance))
    }

    pub async fn buy_item_for(
        &self,
        identity: &Identity,
        item_id: u64,
    ) -> Result<BalanceResponse, WalletError> {
        let item = self
            .catalog
            .get(item_id)
            .ok_or(WalletError::ItemNotFound(item_id))?;

        let balance = self
            .ledger
            .debit(
                identity.user_id,
                item.price,
                Memo::purchase(item.id, item.name.clone()),
            )
            .await?;

        tracing::info!(user_id = identity.user_id, item_id, price = %item.price, "Item purchased");
        Ok(snapshot(identity, balance))
    }

    pub fn list_items(&self) -> &[Item] {
        self.catalog.items()
    }

    // Debug listings, served without authentication

    pub async fn list_users(&self) -> Vec<PublicUser> {
        self.credentials.list().await
    }

    pub async fn list_transactions(&self) -> Vec<Transaction> {
        self.ledger.history().await
    }

    /// One user's transactions in log order
    pub async fn transactions_of(&self, user_id: u64) -> Vec<Transaction> {
        self.ledger.history_of(user_id).await
    }
}

fn snapshot(identity: &Identity, balance: Decimal) -> BalanceResponse {
    BalanceResponse {
        user_id: identity.user_id,
        username: identity.username.clone(),
        balance,
    }
}
