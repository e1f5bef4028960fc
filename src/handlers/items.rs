//! Item catalog HTTP handlers

use axum::{
    extract::{Path, State},
    Json,
};
use axum_extra::extract::WithRejection;

use super::AuthenticatedUser;
use crate::catalog::Item;
use crate::error::{ApiError, ApiResult};
use crate::models::BalanceResponse;
use crate::state::AppState;

/// GET /items/list
pub async fn list_items(State(state): State<AppState>) -> Json<Vec<Item>> {
    Json(state.wallet_service.list_items().to_vec())
}

/// POST /items/buy/:item_id - Purchase an item at its catalog price
pub async fn buy_item(
    State(state): State<AppState>,
    AuthenticatedUser(identity): AuthenticatedUser,
    WithRejection(Path(item_id), _): WithRejection<Path<u64>, ApiError>,
) -> ApiResult<Json<BalanceResponse>> {
    let balance = state
        .wallet_service
        .buy_item_for(&identity, item_id)
        .await?;
    Ok(Json(balance))
}
