//! Application state shared across handlers

use std::sync::Arc;

use axum::extract::FromRef;

use crate::wallet::WalletService;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub wallet_service: Arc<WalletService>,
}

impl AppState {
    pub fn new(wallet_service: Arc<WalletService>) -> Self {
        Self { wallet_service }
    }
}

impl FromRef<AppState> for Arc<WalletService> {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.wallet_service.clone()
    }
}
