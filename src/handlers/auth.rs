//! Authentication HTTP handlers

use axum::{extract::State, http::StatusCode, Form, Json};
use axum_extra::extract::WithRejection;
use validator::Validate;

use crate::error::{ApiError, ApiResult};
use crate::models::{AccessTokenResponse, LoginForm, RegisterRequest, RegisteredUser};
use crate::state::AppState;

/// POST /auth/register - Register a user with the starting balance
pub async fn register(
    State(state): State<AppState>,
    WithRejection(Json(req), _): WithRejection<Json<RegisterRequest>, ApiError>,
) -> ApiResult<(StatusCode, Json<RegisteredUser>)> {
    req.validate()?;

    let user = state
        .wallet_service
        .register(&req.username, &req.password)
        .await?;

    Ok((StatusCode::CREATED, Json(user)))
}

/// POST /auth/login - Exchange form credentials for a bearer token
pub async fn login(
    State(state): State<AppState>,
    WithRejection(Form(form), _): WithRejection<Form<LoginForm>, ApiError>,
) -> ApiResult<Json<AccessTokenResponse>> {
    let token = state
        .wallet_service
        .login(&form.username, &form.password)
        .await?;

    Ok(Json(token))
}
