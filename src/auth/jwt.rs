//! Session token issuance and validation
//!
//! Tokens are HS256 JWTs carrying the user id, username and an absolute
//! expiry. Nothing is stored server-side; validity is computed from the
//! signature and the clock.

use std::collections::HashSet;

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{
    decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::credentials::User;

/// Token validation errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenError {
    #[error("Malformed token")]
    Malformed,

    #[error("Token signature does not verify")]
    BadSignature,

    #[error("Token expired")]
    Expired,
}

/// JWT claims for access tokens
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject (user ID)
    pub sub: String,
    pub username: String,
    /// Issued at (Unix timestamp)
    pub iat: i64,
    /// Expiration (Unix timestamp)
    pub exp: i64,
}

/// Identity recovered from a valid token
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub user_id: u64,
    pub username: String,
}

/// Signs and checks session tokens with a process-wide secret
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    ttl: Duration,
}

impl TokenService {
    /// Create a token service
    ///
    /// # Arguments
    /// * `secret` - HMAC signing secret
    /// * `ttl` - Lifetime of every issued token
    pub fn new(secret: &str, ttl: Duration) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            ttl,
        }
    }

    /// Issue a token for a user, expiring `ttl` from now
    pub fn issue(&self, user: &User) -> Result<String, TokenError> {
        self.issue_at(user, Utc::now())
    }

    /// Issue a token as if the current time were `now`
    pub fn issue_at(&self, user: &User, now: DateTime<Utc>) -> Result<String, TokenError> {
        let claims = Claims {
            sub: user.id.to_string(),
            username: user.username.clone(),
            iat: now.timestamp(),
            exp: (now + self.ttl).timestamp(),
        };

        // Encoding only fails on key/serialization problems, neither of which
        // can happen with an HMAC key and these claims
        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|_| TokenError::Malformed)
    }

    /// Validate a token against the current time
    pub fn validate(&self, token: &str) -> Result<Identity, TokenError> {
        self.validate_at(token, Utc::now())
    }

    /// Validate a token as if the current time were `now`
    ///
    /// The signature is checked before the expiry, so a tampered token is
    /// reported as `BadSignature` even when it is also stale.
    pub fn validate_at(&self, token: &str, now: DateTime<Utc>) -> Result<Identity, TokenError> {
        let mut validation = Validation::new(Algorithm::HS256);
        // Expiry is checked below with no leeway: a token is dead at exp, not exp + 60s
        validation.validate_exp = false;
        validation.required_spec_claims = HashSet::from(["exp".to_string()]);

        let token_data =
            decode::<Claims>(token, &self.decoding_key, &validation).map_err(|e| {
                match e.kind() {
                    ErrorKind::InvalidSignature => TokenError::BadSignature,
                    _ => TokenError::Malformed,
                }
            })?;

        let claims = token_data.claims;
        if now.timestamp() >= claims.exp {
            return Err(TokenError::Expired);
        }

        let user_id = claims.sub.parse::<u64>().map_err(|_| TokenError::Malformed)?;

        Ok(Identity {
            user_id,
            username: claims.username,
        })
    }
}
