//! API error handling
//!
//! Maps wallet failures onto HTTP status codes and a uniform JSON body:
//! `{"error": {"code": "...", "message": "..."}}`.

use axum::{
    extract::rejection::{FormRejection, JsonRejection, PathRejection},
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use crate::auth::TokenError;
use crate::wallet::WalletError;

/// API error type with HTTP status code mapping
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Insufficient funds: {0}")]
    InsufficientFunds(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Authorization header with Bearer token required")]
    MissingToken,

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Internal server error: {0}")]
    InternalError(String),
}

/// JSON error response body
#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: ErrorDetails,
}

#[derive(Serialize)]
pub struct ErrorDetails {
    pub code: String,
    pub message: String,
}

impl ApiError {
    pub fn error_code(&self) -> &'static str {
        match self {
            ApiError::NotFound(_) => "NOT_FOUND",
            ApiError::BadRequest(_) => "BAD_REQUEST",
            ApiError::InsufficientFunds(_) => "INSUFFICIENT_FUNDS",
            ApiError::Unauthorized(_) => "UNAUTHORIZED",
            ApiError::MissingToken => "MISSING_TOKEN",
            ApiError::Conflict(_) => "CONFLICT",
            ApiError::ValidationError(_) => "VALIDATION_ERROR",
            ApiError::InternalError(_) => "INTERNAL_ERROR",
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::InsufficientFunds(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized(_) | ApiError::MissingToken => StatusCode::UNAUTHORIZED,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::ValidationError(_) => StatusCode::BAD_REQUEST,
            ApiError::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let error_code = self.error_code();
        let message = self.to_string();

        match &self {
            ApiError::InternalError(_) => {
                tracing::error!(error = %message, code = %error_code, "Server error occurred");
            }
            _ => {
                tracing::debug!(error = %message, code = %error_code, "Client error occurred");
            }
        }

        let body = ErrorResponse {
            error: ErrorDetails {
                code: error_code.to_string(),
                message,
            },
        };

        let mut response = (status, Json(body)).into_response();
        if status == StatusCode::UNAUTHORIZED {
            response
                .headers_mut()
                .insert(header::WWW_AUTHENTICATE, HeaderValue::from_static("Bearer"));
        }
        response
    }
}

impl From<WalletError> for ApiError {
    fn from(err: WalletError) -> Self {
        let message = err.to_string();
        match err {
            WalletError::DuplicateUsername(_) => ApiError::Conflict(message),
            WalletError::AuthenticationFailure => ApiError::Unauthorized(message),
            WalletError::Token(TokenError::Expired) => {
                ApiError::Unauthorized("Token has expired".to_string())
            }
            // Malformed and forged tokens look the same to the client
            WalletError::Token(_) => {
                ApiError::Unauthorized("Could not validate credentials".to_string())
            }
            WalletError::InvalidAmount(_) => ApiError::BadRequest(message),
            WalletError::InsufficientFunds { .. } => ApiError::InsufficientFunds(message),
            WalletError::UnknownUser(_) | WalletError::ItemNotFound(_) => {
                ApiError::NotFound(message)
            }
            WalletError::AlreadyInitialized(_) | WalletError::Internal(_) => {
                ApiError::InternalError(message)
            }
        }
    }
}

impl From<validator::ValidationErrors> for ApiError {
    fn from(err: validator::ValidationErrors) -> Self {
        ApiError::ValidationError(err.to_string())
    }
}

// Extractor rejections come back in the same JSON error shape

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl From<FormRejection> for ApiError {
    fn from(rejection: FormRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

/// Result type alias using ApiError
pub type ApiResult<T> = Result<T, ApiError>;
