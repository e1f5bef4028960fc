//! Admin/debug routes

use axum::{routing::get, Router};

use crate::handlers::admin;
use crate::state::AppState;

pub fn admin_routes() -> Router<AppState> {
    Router::new()
        .route("/users", get(admin::list_users))
        .route("/transactions", get(admin::list_transactions))
}
