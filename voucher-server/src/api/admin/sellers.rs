//! Seller management endpoints

use axum::{
    Json,
    extract::{Path, Query, State},
};
use shared::error::{AppError, ErrorCode};
use shared::models::{Seller, SellerFilter, Voucher};

use crate::api::ApiResult;
use crate::auth::CurrentUser;
use crate::db;
use crate::services::sellers;
use crate::state::AppState;

/// GET /api/admin/sellers?status=pending
pub async fn list(
    State(state): State<AppState>,
    Query(filter): Query<SellerFilter>,
) -> ApiResult<Vec<Seller>> {
    let rows = db::sellers::list(&state.pool, filter.status)
        .await
        .map_err(|e| {
            tracing::error!("Seller list query error: {e}");
            AppError::new(ErrorCode::InternalError)
        })?;
    Ok(Json(rows))
}

/// GET /api/admin/sellers/{id}
pub async fn get(State(state): State<AppState>, Path(id): Path<i64>) -> ApiResult<Seller> {
    Ok(Json(sellers::get(&state, id).await?))
}

/// POST /api/admin/sellers/{id}/accept
pub async fn accept(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<i64>,
) -> ApiResult<Seller> {
    Ok(Json(sellers::accept(&state, &user, id).await?))
}

/// DELETE /api/admin/sellers/{id}
pub async fn delete(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<i64>,
) -> ApiResult<serde_json::Value> {
    sellers::delete(&state, &user, id).await?;
    Ok(Json(serde_json::json!({ "deleted": true })))
}

/// GET /api/admin/sellers/{id}/vouchers
pub async fn vouchers(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<Vec<Voucher>> {
    let seller = sellers::get(&state, id).await?;
    let rows = db::vouchers::list_by_seller(&state.pool, seller.id)
        .await
        .map_err(|e| {
            tracing::error!("Seller voucher query error: {e}");
            AppError::new(ErrorCode::InternalError)
        })?;
    Ok(Json(rows))
}
