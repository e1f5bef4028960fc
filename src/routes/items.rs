//! Item catalog routes

use axum::{
    routing::{get, post},
    Router,
};

use crate::handlers::items;
use crate::state::AppState;

pub fn item_routes() -> Router<AppState> {
    Router::new()
        .route("/items/list", get(items::list_items))
        .route("/items/buy/:item_id", post(items::buy_item))
}
