//! Route definitions for the wallet API

mod admin;
mod auth;
mod items;
mod wallet;

use axum::{routing::get, Json, Router};
use serde::Serialize;

use crate::state::AppState;

pub use admin::admin_routes;
pub use auth::auth_routes;
pub use items::item_routes;
pub use wallet::wallet_routes;

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Every route of the API, with the request tracing layer applied
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .merge(auth_routes())
        .merge(wallet_routes())
        .merge(item_routes())
        .merge(admin_routes())
        .with_state(state)
        .layer(axum::middleware::from_fn(crate::middleware::request_tracing))
}
