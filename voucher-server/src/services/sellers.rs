//! Seller registration and management

use serde_json::json;
use shared::error::{AppError, ErrorCode};
use shared::models::{Seller, SellerStatus};
use shared::voucher::rules::normalize_phone;

use super::audit;
use crate::auth::CurrentUser;
use crate::db;
use crate::error::{ServiceResult, on_foreign_key, on_unique};
use crate::state::AppState;

pub const MAX_NAME_LEN: usize = 100;

fn seller_not_found(id: i64) -> AppError {
    AppError::new(ErrorCode::SellerNotFound).with_detail("seller_id", id)
}

/// Public sign-up; the seller starts out pending
pub async fn register(
    state: &AppState,
    name: &str,
    phone: &str,
    ip: Option<&str>,
) -> ServiceResult<Seller> {
    let name = name.trim();
    if name.is_empty() {
        return Err(AppError::new(ErrorCode::RequiredField)
            .with_detail("field", "name")
            .into());
    }
    if name.chars().count() > MAX_NAME_LEN {
        return Err(AppError::new(ErrorCode::ValueOutOfRange)
            .with_detail("field", "name")
            .into());
    }
    let phone = normalize_phone(phone)?;

    let now = shared::util::now_millis();
    let seller = db::sellers::create(&state.pool, name, &phone, now)
        .await
        .map_err(on_unique(ErrorCode::SellerAlreadyRegistered))?;

    tracing::info!(seller_id = seller.id, "Seller registered");
    audit(
        &state.pool,
        None,
        "seller_registered",
        json!({ "seller_id": seller.id, "name": seller.name }),
        ip,
    )
    .await;

    Ok(seller)
}

pub async fn get(state: &AppState, id: i64) -> ServiceResult<Seller> {
    let seller = db::sellers::find(&state.pool, id)
        .await?
        .ok_or_else(|| seller_not_found(id))?;
    Ok(seller)
}

pub async fn accept(state: &AppState, user: &CurrentUser, id: i64) -> ServiceResult<Seller> {
    let mut tx = state.pool.begin().await?;
    let mut seller = db::sellers::find_for_update(&mut *tx, id)
        .await?
        .ok_or_else(|| seller_not_found(id))?;
    if seller.is_accepted() {
        return Err(AppError::new(ErrorCode::SellerAlreadyAccepted)
            .with_detail("seller_id", id)
            .into());
    }
    db::sellers::set_status(&mut *tx, id, SellerStatus::Accepted).await?;
    tx.commit().await?;
    seller.status = SellerStatus::Accepted;

    tracing::info!(seller_id = id, user = %user.username, "Seller accepted");
    audit(&state.pool, Some(user.id), "seller_accepted", json!({ "seller_id": id }), None).await;

    Ok(seller)
}

/// Delete a seller carrying no vouchers, together with its login accounts
pub async fn delete(state: &AppState, user: &CurrentUser, id: i64) -> ServiceResult<()> {
    let mut tx = state.pool.begin().await?;
    db::sellers::find_for_update(&mut *tx, id)
        .await?
        .ok_or_else(|| seller_not_found(id))?;

    let carried = db::vouchers::count_by_seller(&mut *tx, id).await?;
    if carried > 0 {
        return Err(AppError::new(ErrorCode::SellerHasVouchers)
            .with_detail("seller_id", id)
            .with_detail("vouchers", carried)
            .into());
    }

    let accounts = db::users::delete_by_seller(&mut *tx, id)
        .await
        .map_err(on_foreign_key(AppError::invalid_request(
            "A linked account has recorded transactions; disable it instead",
        )))?;
    db::sellers::delete(&mut *tx, id).await?;
    tx.commit().await?;

    tracing::info!(seller_id = id, accounts, user = %user.username, "Seller deleted");
    audit(&state.pool, Some(user.id), "seller_deleted", json!({ "seller_id": id }), None).await;

    Ok(())
}
