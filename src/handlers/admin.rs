//! Debug listings (no authentication)

use axum::{extract::State, Json};

use crate::auth::PublicUser;
use crate::models::TransactionResponse;
use crate::state::AppState;

/// GET /users - Every user, without password hashes
pub async fn list_users(State(state): State<AppState>) -> Json<Vec<PublicUser>> {
    Json(state.wallet_service.list_users().await)
}

/// GET /transactions - The full transaction log
pub async fn list_transactions(State(state): State<AppState>) -> Json<Vec<TransactionResponse>> {
    let transactions = state.wallet_service.list_transactions().await;
    Json(transactions.into_iter().map(Into::into).collect())
}
