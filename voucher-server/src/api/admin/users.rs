//! User account endpoints

use axum::{
    Json,
    extract::{Path, State},
};
use serde::Deserialize;
use shared::models::{Role, User};
use validator::Validate;

use crate::api::ApiResult;
use crate::auth::CurrentUser;
use crate::error::validation_error;
use crate::services::users;
use crate::state::AppState;

/// GET /api/admin/users
pub async fn list(State(state): State<AppState>) -> ApiResult<Vec<User>> {
    Ok(Json(users::list(&state).await?))
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateUserRequest {
    #[validate(length(max = 256))]
    pub username: String,
    #[validate(length(max = 256))]
    pub password: String,
    pub role: Role,
    pub seller_id: Option<i64>,
}

/// POST /api/admin/users
pub async fn create(
    State(state): State<AppState>,
    admin: CurrentUser,
    Json(req): Json<CreateUserRequest>,
) -> ApiResult<User> {
    req.validate().map_err(validation_error)?;
    let user = users::create(
        &state,
        &admin,
        &req.username,
        &req.password,
        req.role,
        req.seller_id,
    )
    .await?;
    Ok(Json(user))
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateUserRequest {
    #[validate(length(max = 256))]
    pub password: Option<String>,
    pub is_active: Option<bool>,
}

/// PUT /api/admin/users/{id}
pub async fn update(
    State(state): State<AppState>,
    admin: CurrentUser,
    Path(id): Path<i64>,
    Json(req): Json<UpdateUserRequest>,
) -> ApiResult<User> {
    req.validate().map_err(validation_error)?;
    let user = users::update(&state, &admin, id, req.password.as_deref(), req.is_active).await?;
    Ok(Json(user))
}

/// DELETE /api/admin/users/{id}
pub async fn delete(
    State(state): State<AppState>,
    admin: CurrentUser,
    Path(id): Path<i64>,
) -> ApiResult<serde_json::Value> {
    users::delete(&state, &admin, id).await?;
    Ok(Json(serde_json::json!({ "deleted": true })))
}
