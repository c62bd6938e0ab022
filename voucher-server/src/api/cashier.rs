//! Cashier endpoints

use axum::{
    Json,
    extract::{Path, Query, State},
};
use shared::models::{BranchMenuItem, MenuQuery, Quote, RedeemRequest, Redemption, Voucher};

use crate::auth::CurrentUser;
use crate::services::redemption;
use crate::state::AppState;

use super::ApiResult;

/// GET /api/cashier/vouchers/{code}
pub async fn check_voucher(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> ApiResult<Voucher> {
    Ok(Json(redemption::check(&state, &code).await?))
}

/// GET /api/cashier/menu?branch=sedati&search=
pub async fn menu(
    State(state): State<AppState>,
    Query(query): Query<MenuQuery>,
) -> ApiResult<Vec<BranchMenuItem>> {
    let items = redemption::menu(&state, query.branch, query.search.as_deref()).await?;
    Ok(Json(items))
}

/// POST /api/cashier/quote
pub async fn quote(
    State(state): State<AppState>,
    Json(req): Json<RedeemRequest>,
) -> ApiResult<Quote> {
    Ok(Json(redemption::quote(&state, &req).await?))
}

/// POST /api/cashier/redeem
pub async fn redeem(
    State(state): State<AppState>,
    user: CurrentUser,
    Json(req): Json<RedeemRequest>,
) -> ApiResult<Redemption> {
    Ok(Json(redemption::redeem(&state, &user, &req).await?))
}
