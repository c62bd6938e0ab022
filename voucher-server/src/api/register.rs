//! Public seller registration

use axum::{Json, extract::State};
use serde::Deserialize;
use shared::models::Seller;
use validator::Validate;

use crate::auth::ClientIp;
use crate::error::validation_error;
use crate::services::sellers;
use crate::state::AppState;

use super::ApiResult;

#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[validate(length(min = 6, max = 32))]
    pub phone: String,
}

/// POST /api/register
pub async fn register(
    State(state): State<AppState>,
    ClientIp(ip): ClientIp,
    Json(req): Json<RegisterRequest>,
) -> ApiResult<Seller> {
    req.validate().map_err(validation_error)?;
    let seller = sellers::register(&state, &req.name, &req.phone, Some(&ip)).await?;
    Ok(Json(seller))
}
