//! Password hashing
//!
//! Salted bcrypt hashes. Raw passwords never leave this module in any form
//! other than the hash.

use thiserror::Error;

/// Errors that can occur while hashing or checking a password
#[derive(Error, Debug)]
pub enum CryptoError {
    #[error("Password hashing failed: {0}")]
    HashingFailed(String),

    #[error("Stored password hash is malformed: {0}")]
    MalformedHash(String),
}

/// Hash a password with a fresh random salt
///
/// # Arguments
/// * `password` - The plaintext password
/// * `cost` - bcrypt work factor (4..=31)
pub fn hash_password(password: &str, cost: u32) -> Result<String, CryptoError> {
    bcrypt::hash(password, cost).map_err(|e| CryptoError::HashingFailed(e.to_string()))
}

/// Check a plaintext password against a stored bcrypt hash
///
/// Returns `Ok(false)` on mismatch; `Err` only when the stored hash itself
/// cannot be parsed.
pub fn verify_password(password: &str, hash: &str) -> Result<bool, CryptoError> {
    bcrypt::verify(password, hash).map_err(|e| CryptoError::MalformedHash(e.to_string()))
}
