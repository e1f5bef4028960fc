//! Bearer-token authentication
//!
//! Extracts and validates the session token from the `Authorization` header.

use std::sync::Arc;

use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use axum_extra::{
    headers::{authorization::Bearer, Authorization},
    TypedHeader,
};

use crate::auth::Identity;
use crate::error::ApiError;
use crate::wallet::WalletService;

/// Identity of the caller, taken from a valid bearer token
///
/// The token is trusted for its whole lifetime; nothing is looked up in the
/// credential store.
///
/// # Example
///
/// ```rust,ignore
/// async fn protected_handler(user: AuthenticatedUser) -> impl IntoResponse {
///     format!("Hello, user {}", user.0.username)
/// }
/// ```
#[derive(Debug, Clone)]
pub struct AuthenticatedUser(pub Identity);

#[async_trait]
impl<S> FromRequestParts<S> for AuthenticatedUser
where
    Arc<WalletService>: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let TypedHeader(Authorization(bearer)) =
            TypedHeader::<Authorization<Bearer>>::from_request_parts(parts, state)
                .await
                .map_err(|_| ApiError::MissingToken)?;

        let wallet_service = Arc::<WalletService>::from_ref(state);
        let identity = wallet_service.authenticate(bearer.token())?;

        Ok(AuthenticatedUser(identity))
    }
}
