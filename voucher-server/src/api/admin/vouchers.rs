//! Voucher registry endpoints

use axum::{
    Json,
    extract::{Path, Query, State},
    response::Response,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use shared::error::{AppError, ErrorCode};
use shared::models::{
    Page, PageQuery, Voucher, VoucherFilter, VoucherHistory, VoucherStatus, VoucherUpdate,
};
use validator::Validate;

use super::csv_response;
use crate::api::ApiResult;
use crate::auth::CurrentUser;
use crate::db;
use crate::error::validation_error;
use crate::services::vouchers::{self, Assignment};
use crate::state::AppState;

/// GET /api/admin/vouchers
pub async fn list(
    State(state): State<AppState>,
    Query(filter): Query<VoucherFilter>,
    Query(page): Query<PageQuery>,
) -> ApiResult<Page<Voucher>> {
    let statuses = match filter.status.as_deref() {
        None => None,
        Some(raw) => {
            let parsed = VoucherStatus::parse_list(raw).ok_or_else(|| {
                AppError::with_message(ErrorCode::InvalidFormat, format!("Invalid status filter: {raw}"))
                    .with_detail("field", "status")
            })?;
            Some(parsed).filter(|s| !s.is_empty())
        }
    };

    let (limit, offset) = page.limit_offset();
    let (items, total) = db::vouchers::list(&state.pool, statuses.as_deref(), &filter, limit, offset)
        .await
        .map_err(|e| {
            tracing::error!("Voucher list query error: {e}");
            AppError::new(ErrorCode::InternalError)
        })?;

    Ok(Json(Page::new(items, total, page)))
}

/// GET /api/admin/vouchers/{code}
pub async fn get(State(state): State<AppState>, Path(code): Path<String>) -> ApiResult<Voucher> {
    Ok(Json(vouchers::get(&state, &code).await?))
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateVoucherRequest {
    #[validate(length(min = 1, max = 64))]
    pub code: String,
    pub initial_value: i64,
    pub expires_on: Option<NaiveDate>,
}

/// POST /api/admin/vouchers
pub async fn create(
    State(state): State<AppState>,
    user: CurrentUser,
    Json(req): Json<CreateVoucherRequest>,
) -> ApiResult<Voucher> {
    req.validate().map_err(validation_error)?;
    let voucher =
        vouchers::create(&state, &user, &req.code, req.initial_value, req.expires_on).await?;
    Ok(Json(voucher))
}

#[derive(Debug, Deserialize, Validate)]
pub struct GenerateRequest {
    pub count: u32,
    pub initial_value: i64,
    #[validate(length(max = 32))]
    pub prefix: Option<String>,
    pub expires_on: Option<NaiveDate>,
}

#[derive(Debug, Serialize)]
pub struct GenerateResponse {
    pub count: usize,
    pub codes: Vec<String>,
}

/// POST /api/admin/vouchers/generate
pub async fn generate(
    State(state): State<AppState>,
    user: CurrentUser,
    Json(req): Json<GenerateRequest>,
) -> ApiResult<GenerateResponse> {
    req.validate().map_err(validation_error)?;
    let codes = vouchers::generate(
        &state,
        &user,
        req.count,
        req.initial_value,
        req.prefix.as_deref(),
        req.expires_on,
    )
    .await?;
    Ok(Json(GenerateResponse {
        count: codes.len(),
        codes,
    }))
}

/// PUT /api/admin/vouchers/{code}
pub async fn update(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(code): Path<String>,
    Json(patch): Json<VoucherUpdate>,
) -> ApiResult<Voucher> {
    Ok(Json(vouchers::update(&state, &user, &code, patch).await?))
}

/// DELETE /api/admin/vouchers/{code}
pub async fn delete(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(code): Path<String>,
) -> ApiResult<serde_json::Value> {
    vouchers::delete(&state, &user, &code).await?;
    Ok(Json(serde_json::json!({ "deleted": true })))
}

#[derive(Debug, Deserialize, Validate)]
pub struct AssignRequest {
    pub seller_id: i64,
    #[validate(length(min = 1, max = 500))]
    pub codes: Vec<String>,
}

/// POST /api/admin/vouchers/assign
pub async fn assign(
    State(state): State<AppState>,
    user: CurrentUser,
    Json(req): Json<AssignRequest>,
) -> ApiResult<Assignment> {
    req.validate().map_err(validation_error)?;
    Ok(Json(vouchers::assign(&state, &user, req.seller_id, &req.codes).await?))
}

/// GET /api/admin/vouchers/{code}/transactions
pub async fn history(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> ApiResult<VoucherHistory> {
    let voucher = vouchers::get(&state, &code).await?;
    let transactions = db::transactions::list_by_voucher(&state.pool, &voucher.code)
        .await
        .map_err(|e| {
            tracing::error!("Voucher history query error: {e}");
            AppError::new(ErrorCode::InternalError)
        })?;
    Ok(Json(VoucherHistory::new(voucher.code, transactions)))
}

/// GET /api/admin/vouchers/export
pub async fn export(State(state): State<AppState>) -> Result<Response, AppError> {
    let all = db::vouchers::list_all(&state.pool).await.map_err(|e| {
        tracing::error!("Voucher export query error: {e}");
        AppError::new(ErrorCode::InternalError)
    })?;
    let body = shared::report::csv::vouchers_csv(&all);
    Ok(csv_response(&format!("vouchers-{}.csv", state.today()), body))
}
