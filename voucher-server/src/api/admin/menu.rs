//! Menu management endpoints

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;
use shared::error::{AppError, ErrorCode};
use shared::models::{MenuItem, MenuItemCreate, MenuItemUpdate};

use crate::api::ApiResult;
use crate::auth::CurrentUser;
use crate::db;
use crate::services::menu;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct MenuSearch {
    pub search: Option<String>,
}

/// GET /api/admin/menu
pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<MenuSearch>,
) -> ApiResult<Vec<MenuItem>> {
    let search = query.search.as_deref().map(str::trim).filter(|s| !s.is_empty());
    let items = db::menu::list(&state.pool, search).await.map_err(|e| {
        tracing::error!("Menu list query error: {e}");
        AppError::new(ErrorCode::InternalError)
    })?;
    Ok(Json(items))
}

/// POST /api/admin/menu
pub async fn create(
    State(state): State<AppState>,
    user: CurrentUser,
    Json(req): Json<MenuItemCreate>,
) -> ApiResult<MenuItem> {
    Ok(Json(menu::create(&state, &user, req).await?))
}

/// PUT /api/admin/menu/{id}
pub async fn update(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<i64>,
    Json(patch): Json<MenuItemUpdate>,
) -> ApiResult<MenuItem> {
    Ok(Json(menu::update(&state, &user, id, patch).await?))
}

/// DELETE /api/admin/menu/{id}
pub async fn delete(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<i64>,
) -> ApiResult<serde_json::Value> {
    menu::delete(&state, &user, id).await?;
    Ok(Json(serde_json::json!({ "deleted": true })))
}
