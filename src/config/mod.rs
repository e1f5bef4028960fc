//! Configuration management for the wallet server
//!
//! Loads settings from environment variables (and `.env` when present), with
//! stricter requirements in production.

use std::env;
use std::net::IpAddr;
use std::str::FromStr;

use chrono::Duration;
use rand::distributions::Alphanumeric;
use rand::Rng;
use rust_decimal::Decimal;
use thiserror::Error;

use crate::ledger::has_cent_precision;

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("Invalid environment value: {0}")]
    InvalidValue(String),

    #[error("Invalid port number: {0}")]
    InvalidPort(String),
}

/// Application environment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Environment {
    #[default]
    Development,
    Staging,
    Production,
}

impl FromStr for Environment {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "dev" | "development" => Ok(Environment::Development),
            "staging" => Ok(Environment::Staging),
            "prod" | "production" => Ok(Environment::Production),
            _ => Err(ConfigError::InvalidValue(format!(
                "Invalid environment: '{}'. Expected: dev, staging, or prod",
                s
            ))),
        }
    }
}

impl Environment {
    pub fn is_production(&self) -> bool {
        matches!(self, Environment::Production)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Development => "development",
            Environment::Staging => "staging",
            Environment::Production => "production",
        }
    }
}

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub environment: Environment,

    /// Bind address
    pub host: IpAddr,

    /// Server port
    pub port: u16,

    /// Log level (RUST_LOG)
    pub log_level: String,

    /// HMAC secret for token signing
    pub jwt_secret: String,

    /// True when no secret was configured and a random one was generated
    pub jwt_secret_is_ephemeral: bool,

    /// Access token TTL (default: 30 minutes)
    pub access_token_ttl: Duration,

    /// bcrypt work factor
    pub bcrypt_cost: u32,

    /// Balance granted to every new user
    pub starting_balance: Decimal,

    /// CORS allowed origins, comma separated
    pub cors_allowed_origins: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            environment: Environment::Development,
            host: IpAddr::from([127, 0, 0, 1]),
            port: 8000,
            log_level: "info".to_string(),
            jwt_secret: generate_secret(),
            jwt_secret_is_ephemeral: true,
            access_token_ttl: Duration::minutes(30),
            bcrypt_cost: bcrypt::DEFAULT_COST,
            starting_balance: Decimal::new(10000, 2),
            cors_allowed_origins: None,
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors)
        dotenvy::dotenv().ok();

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Config::default();

        let environment = match lookup("ENVIRONMENT") {
            Some(value) => value.parse::<Environment>()?,
            None => defaults.environment,
        };

        let host = match lookup("HOST") {
            Some(value) => value
                .parse::<IpAddr>()
                .map_err(|_| ConfigError::InvalidValue(format!("HOST is not an IP address: {}", value)))?,
            None => defaults.host,
        };

        let port = match lookup("PORT") {
            Some(value) => value
                .parse::<u16>()
                .map_err(|_| ConfigError::InvalidPort(format!("PORT must be a valid number, got '{}'", value)))?,
            None => defaults.port,
        };

        let log_level = lookup("RUST_LOG").unwrap_or(defaults.log_level);

        // A random secret invalidates every token on restart, which is only
        // acceptable outside production
        let (jwt_secret, jwt_secret_is_ephemeral) = match lookup("JWT_SECRET") {
            Some(secret) if !secret.is_empty() => (secret, false),
            _ if environment.is_production() => {
                return Err(ConfigError::MissingEnvVar("JWT_SECRET".to_string()))
            }
            _ => (defaults.jwt_secret, true),
        };

        let access_token_ttl = match lookup("JWT_ACCESS_TOKEN_TTL_MINUTES") {
            Some(value) => match value.parse::<i64>() {
                Ok(minutes) if minutes > 0 => Duration::minutes(minutes),
                _ => {
                    return Err(ConfigError::InvalidValue(format!(
                        "JWT_ACCESS_TOKEN_TTL_MINUTES must be a positive integer, got '{}'",
                        value
                    )))
                }
            },
            None => defaults.access_token_ttl,
        };

        let bcrypt_cost = match lookup("BCRYPT_COST") {
            Some(value) => match value.parse::<u32>() {
                Ok(cost) if (4..=31).contains(&cost) => cost,
                _ => {
                    return Err(ConfigError::InvalidValue(format!(
                        "BCRYPT_COST must be between 4 and 31, got '{}'",
                        value
                    )))
                }
            },
            None => defaults.bcrypt_cost,
        };

        let starting_balance = match lookup("STARTING_BALANCE") {
            Some(value) => match Decimal::from_str(&value) {
                Ok(amount) if amount >= Decimal::ZERO && has_cent_precision(amount) => amount,
                _ => {
                    return Err(ConfigError::InvalidValue(format!(
                        "STARTING_BALANCE must be a non-negative amount in whole cents, got '{}'",
                        value
                    )))
                }
            },
            None => defaults.starting_balance,
        };

        let cors_allowed_origins = lookup("CORS_ALLOWED_ORIGINS").filter(|s| !s.trim().is_empty());

        Ok(Config {
            environment,
            host,
            port,
            log_level,
            jwt_secret,
            jwt_secret_is_ephemeral,
            access_token_ttl,
            bcrypt_cost,
            starting_balance,
            cors_allowed_origins,
        })
    }
}

fn generate_secret() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(64)
        .map(char::from)
        .collect()
}
