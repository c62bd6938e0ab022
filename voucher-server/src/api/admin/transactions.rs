//! Transaction ledger endpoints

use axum::{
    Json,
    extract::{Query, State},
    response::Response,
};
use shared::error::{AppError, ErrorCode};
use shared::models::{Page, PageQuery, Transaction, TransactionFilter};

use super::{csv_response, date_range};
use crate::api::ApiResult;
use crate::db;
use crate::db::transactions::LedgerFilter;
use crate::state::AppState;

fn ledger_filter<'a>(
    filter: &'a TransactionFilter,
    state: &AppState,
) -> Result<LedgerFilter<'a>, AppError> {
    let (start, end) = date_range(filter.from, filter.to, state.business_offset)?;
    Ok(LedgerFilter {
        code: filter.code.as_deref().map(str::trim).filter(|c| !c.is_empty()),
        branch: filter.branch,
        start,
        end,
    })
}

/// GET /api/admin/transactions
pub async fn list(
    State(state): State<AppState>,
    Query(filter): Query<TransactionFilter>,
    Query(page): Query<PageQuery>,
) -> ApiResult<Page<Transaction>> {
    let ledger = ledger_filter(&filter, &state)?;
    let (limit, offset) = page.limit_offset();
    let (items, total) = db::transactions::list(&state.pool, &ledger, limit, offset)
        .await
        .map_err(|e| {
            tracing::error!("Transaction list query error: {e}");
            AppError::new(ErrorCode::InternalError)
        })?;
    Ok(Json(Page::new(items, total, page)))
}

/// GET /api/admin/transactions/export
pub async fn export(
    State(state): State<AppState>,
    Query(filter): Query<TransactionFilter>,
) -> Result<Response, AppError> {
    let ledger = ledger_filter(&filter, &state)?;
    let rows = db::transactions::list_matching(&state.pool, &ledger)
        .await
        .map_err(|e| {
            tracing::error!("Transaction export query error: {e}");
            AppError::new(ErrorCode::InternalError)
        })?;
    let body = shared::report::csv::transactions_csv(&rows, state.business_offset);
    Ok(csv_response(&format!("transactions-{}.csv", state.today()), body))
}
