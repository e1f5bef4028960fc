//! Wallet routes

use axum::{
    routing::{get, post},
    Router,
};

use crate::handlers::wallet;
use crate::state::AppState;

pub fn wallet_routes() -> Router<AppState> {
    Router::new()
        .route("/wallet/balance", get(wallet::get_balance))
        .route("/wallet/spend", post(wallet::spend))
}
