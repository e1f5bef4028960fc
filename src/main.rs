//! Wallet Server
//!
//! HTTP entry point: loads configuration, builds the wallet core and serves
//! the API until Ctrl+C or SIGTERM.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use axum::http::{header, HeaderValue, Method};
use tokio::signal;
use tower_http::cors::CorsLayer;

use wallet_server::auth::{CredentialStore, TokenService};
use wallet_server::catalog::ItemCatalog;
use wallet_server::config::Config;
use wallet_server::ledger::Ledger;
use wallet_server::routes;
use wallet_server::state::AppState;
use wallet_server::wallet::WalletService;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env().context("Failed to load configuration")?;

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.log_level)),
        )
        .with_target(true)
        .init();

    tracing::info!(environment = config.environment.as_str(), "Starting wallet server");
    if config.jwt_secret_is_ephemeral {
        tracing::warn!("JWT_SECRET not set, using a random per-process secret");
    }

    let catalog = ItemCatalog::seeded();
    tracing::info!(items = catalog.items().len(), "Item catalog loaded");

    let wallet_service = Arc::new(WalletService::new(
        CredentialStore::new(config.bcrypt_cost),
        TokenService::new(&config.jwt_secret, config.access_token_ttl),
        Ledger::new(),
        catalog,
        config.starting_balance,
    ));
    tracing::info!(starting_balance = %config.starting_balance, "Wallet service ready");

    let app = routes::app(AppState::new(wallet_service)).layer(configure_cors(&config));

    let addr = SocketAddr::new(config.host, config.port);
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

fn configure_cors(config: &Config) -> CorsLayer {
    let Some(allowed) = config.cors_allowed_origins.as_deref() else {
        tracing::warn!("CORS_ALLOWED_ORIGINS not set, allowing all origins (permissive)");
        return CorsLayer::permissive();
    };

    let origins: Vec<HeaderValue> = allowed
        .split(',')
        .filter_map(|s| s.trim().parse().ok())
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, initiating graceful shutdown...");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, initiating graceful shutdown...");
        }
    }
}
