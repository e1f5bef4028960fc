//! Wallet HTTP handlers

use axum::{extract::State, Json};
use axum_extra::extract::WithRejection;

use super::AuthenticatedUser;
use crate::error::{ApiError, ApiResult};
use crate::models::{BalanceResponse, SpendRequest};
use crate::state::AppState;

/// GET /wallet/balance - Current balance of the caller
pub async fn get_balance(
    State(state): State<AppState>,
    AuthenticatedUser(identity): AuthenticatedUser,
) -> ApiResult<Json<BalanceResponse>> {
    let balance = state.wallet_service.balance_for(&identity).await?;
    Ok(Json(balance))
}

/// POST /wallet/spend - Deduct an arbitrary amount
pub async fn spend(
    State(state): State<AppState>,
    AuthenticatedUser(identity): AuthenticatedUser,
    WithRejection(Json(req), _): WithRejection<Json<SpendRequest>, ApiError>,
) -> ApiResult<Json<BalanceResponse>> {
    let balance = state
        .wallet_service
        .spend_for(&identity, req.amount, &req.description)
        .await?;
    Ok(Json(balance))
}
