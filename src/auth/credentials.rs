//! Credential store
//!
//! Owns the username → user identity mapping. Passwords are hashed before they
//! are stored and the raw value is dropped immediately.

use std::collections::{BTreeMap, HashMap};

use serde::Serialize;
use thiserror::Error;
use tokio::sync::RwLock;

use super::crypto::{hash_password, verify_password, CryptoError};

/// Credential store errors
#[derive(Error, Debug)]
pub enum CredentialError {
    #[error("Username already registered: {0}")]
    DuplicateUsername(String),

    /// Unknown user and wrong password are indistinguishable
    #[error("Incorrect username or password")]
    AuthenticationFailure,

    #[error("Credential store failure: {0}")]
    Internal(String),
}

impl From<CryptoError> for CredentialError {
    fn from(e: CryptoError) -> Self {
        CredentialError::Internal(e.to_string())
    }
}

/// Registered user as held by the store
#[derive(Debug, Clone)]
pub struct User {
    pub id: u64,
    pub username: String,
    pub password_hash: String,
}

/// User record with the password hash stripped
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PublicUser {
    pub id: u64,
    pub username: String,
}

impl From<&User> for PublicUser {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            username: user.username.clone(),
        }
    }
}

#[derive(Default)]
struct Users {
    by_id: BTreeMap<u64, User>,
    ids_by_name: HashMap<String, u64>,
    last_id: u64,
}

/// In-memory credential store
pub struct CredentialStore {
    users: RwLock<Users>,
    bcrypt_cost: u32,
}

impl CredentialStore {
    /// Create an empty store hashing with the given bcrypt cost
    pub fn new(bcrypt_cost: u32) -> Self {
        Self {
            users: RwLock::new(Users::default()),
            bcrypt_cost,
        }
    }

    /// Register a new user and allocate the next sequential id
    pub async fn register(&self, username: &str, password: &str) -> Result<User, CredentialError> {
        // Rechecked under the write lock below
        if self.users.read().await.ids_by_name.contains_key(username) {
            return Err(CredentialError::DuplicateUsername(username.to_string()));
        }

        let password = password.to_string();
        let cost = self.bcrypt_cost;
        let password_hash = tokio::task::spawn_blocking(move || hash_password(&password, cost))
            .await
            .map_err(|e| CredentialError::Internal(e.to_string()))??;

        let mut users = self.users.write().await;
        if users.ids_by_name.contains_key(username) {
            return Err(CredentialError::DuplicateUsername(username.to_string()));
        }

        users.last_id += 1;
        let user = User {
            id: users.last_id,
            username: username.to_string(),
            password_hash,
        };
        users.ids_by_name.insert(user.username.clone(), user.id);
        users.by_id.insert(user.id, user.clone());

        Ok(user)
    }

    /// Check a username/password pair
    pub async fn verify(&self, username: &str, password: &str) -> Result<User, CredentialError> {
        let user = {
            let users = self.users.read().await;
            users
                .ids_by_name
                .get(username)
                .and_then(|id| users.by_id.get(id))
                .cloned()
        }
        .ok_or(CredentialError::AuthenticationFailure)?;

        let password = password.to_string();
        let hash = user.password_hash.clone();
        let matches = tokio::task::spawn_blocking(move || verify_password(&password, &hash))
            .await
            .map_err(|e| CredentialError::Internal(e.to_string()))??;

        if matches {
            Ok(user)
        } else {
            Err(CredentialError::AuthenticationFailure)
        }
    }

    /// All users in id order, without password hashes
    pub async fn list(&self) -> Vec<PublicUser> {
        self.users
            .read()
            .await
            .by_id
            .values()
            .map(PublicUser::from)
            .collect()
    }
}
