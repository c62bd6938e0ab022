//! Audit log endpoint

use axum::{
    Json,
    extract::{Query, State},
};
use shared::error::{AppError, ErrorCode};
use shared::models::{AuditEntry, Page, PageQuery};

use crate::api::ApiResult;
use crate::state::AppState;

/// GET /api/admin/audit-log
pub async fn audit_log(
    State(state): State<AppState>,
    Query(page): Query<PageQuery>,
) -> ApiResult<Page<AuditEntry>> {
    let (limit, offset) = page.limit_offset();
    let (entries, total) = crate::db::audit::query(&state.pool, limit, offset)
        .await
        .map_err(|e| {
            tracing::error!("Audit log query error: {e}");
            AppError::new(ErrorCode::InternalError)
        })?;
    Ok(Json(Page::new(entries, total, page)))
}
