//! Report endpoints
//!
//! Rows are fetched here and aggregated by `shared::report`.

use axum::{
    Json,
    extract::{Query, State},
};
use chrono::NaiveDate;
use serde::Deserialize;
use shared::error::{AppError, ErrorCode};
use shared::models::Branch;
use shared::report::{
    SellerReport, TransactionReport, VoucherReport, seller_report, transaction_report,
    voucher_report,
};

use super::date_range;
use crate::api::ApiResult;
use crate::db;
use crate::db::transactions::LedgerFilter;
use crate::state::AppState;

fn query_failed(e: sqlx::Error) -> AppError {
    tracing::error!("Report query error: {e}");
    AppError::new(ErrorCode::InternalError)
}

/// GET /api/admin/reports/vouchers
pub async fn vouchers(State(state): State<AppState>) -> ApiResult<VoucherReport> {
    let vouchers = db::vouchers::list_all(&state.pool).await.map_err(query_failed)?;
    let transactions = db::transactions::list_matching(&state.pool, &LedgerFilter::default())
        .await
        .map_err(query_failed)?;
    Ok(Json(voucher_report(&vouchers, &transactions, state.business_offset)))
}

#[derive(Debug, Deserialize)]
pub struct TransactionReportQuery {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
    pub branch: Option<Branch>,
}

/// GET /api/admin/reports/transactions?from=&to=&branch=
pub async fn transactions(
    State(state): State<AppState>,
    Query(query): Query<TransactionReportQuery>,
) -> ApiResult<TransactionReport> {
    let (start, end) = date_range(query.from, query.to, state.business_offset)?;
    let filter = LedgerFilter {
        code: None,
        branch: query.branch,
        start,
        end,
    };
    let rows = db::transactions::list_matching(&state.pool, &filter)
        .await
        .map_err(query_failed)?;
    Ok(Json(transaction_report(&rows)))
}

#[derive(Debug, Deserialize)]
pub struct DateRangeQuery {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

/// GET /api/admin/reports/sellers?from=&to=
pub async fn sellers(
    State(state): State<AppState>,
    Query(query): Query<DateRangeQuery>,
) -> ApiResult<SellerReport> {
    let (start, end) = date_range(query.from, query.to, state.business_offset)?;
    let vouchers = db::vouchers::list_created_between(&state.pool, start, end)
        .await
        .map_err(query_failed)?;
    Ok(Json(seller_report(&vouchers)))
}
