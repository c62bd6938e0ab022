//! Session endpoints: login and identity

use axum::{Json, extract::State};
use serde::Deserialize;
use shared::models::UserInfo;
use validator::Validate;

use crate::auth::{ClientIp, CurrentUser};
use crate::error::validation_error;
use crate::services::users::{self, LoginResponse};
use crate::state::AppState;

use super::ApiResult;

#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1, max = 64))]
    pub username: String,
    #[validate(length(min = 1, max = 256))]
    pub password: String,
}

/// POST /api/auth/login
pub async fn login(
    State(state): State<AppState>,
    ClientIp(ip): ClientIp,
    Json(req): Json<LoginRequest>,
) -> ApiResult<LoginResponse> {
    req.validate().map_err(validation_error)?;
    let response = users::login(&state, &req.username, &req.password, &ip).await?;
    Ok(Json(response))
}

/// GET /api/auth/me
pub async fn me(user: CurrentUser) -> ApiResult<UserInfo> {
    Ok(Json(user.into()))
}
