//! Authentication routes

use axum::{routing::post, Router};

use crate::handlers::auth;
use crate::state::AppState;

pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(auth::register))
        .route("/auth/login", post(auth::login))
}
