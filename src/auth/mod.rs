//! Authentication module
//!
//! - Credential store with bcrypt-hashed passwords
//! - Stateless JWT session tokens with a fixed TTL

mod credentials;
mod crypto;
mod jwt;

pub use credentials::{CredentialError, CredentialStore, PublicUser, User};
pub use crypto::{hash_password, verify_password, CryptoError};
pub use jwt::{Claims, Identity, TokenError, TokenService};
