//! Seller endpoints: own vouchers and activation

use axum::{
    Json,
    extract::{Path, State},
};
use serde::Deserialize;
use shared::models::Voucher;
use validator::Validate;

use crate::auth::CurrentUser;
use crate::error::validation_error;
use crate::services::activation;
use crate::state::AppState;

use super::ApiResult;

/// GET /api/seller/vouchers
pub async fn list_vouchers(
    State(state): State<AppState>,
    user: CurrentUser,
) -> ApiResult<Vec<Voucher>> {
    Ok(Json(activation::my_vouchers(&state, &user).await?))
}

/// GET /api/seller/vouchers/{code}
pub async fn get_voucher(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(code): Path<String>,
) -> ApiResult<Voucher> {
    Ok(Json(activation::my_voucher(&state, &user, &code).await?))
}

#[derive(Debug, Deserialize, Validate)]
pub struct ActivateRequest {
    #[validate(length(min = 1, max = 100))]
    pub buyer_name: String,
    #[validate(length(min = 6, max = 32))]
    pub buyer_phone: String,
}

/// POST /api/seller/vouchers/{code}/activate
pub async fn activate(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(code): Path<String>,
    Json(req): Json<ActivateRequest>,
) -> ApiResult<Voucher> {
    req.validate().map_err(validation_error)?;
    let voucher =
        activation::activate(&state, &user, &code, &req.buyer_name, &req.buyer_phone).await?;
    Ok(Json(voucher))
}
