//! Voucher registry operations (admin)

use chrono::NaiveDate;
use serde::Serialize;
use serde_json::json;
use shared::error::{AppError, ErrorCode};
use shared::models::{Voucher, VoucherUpdate};
use shared::voucher::{apply_update, generate_code, normalize_code, normalize_prefix};

use super::audit;
use crate::auth::CurrentUser;
use crate::db;
use crate::error::{ServiceResult, on_foreign_key, on_unique};
use crate::state::AppState;

pub const MAX_GENERATE: u32 = 500;
/// Attempts per generated code before giving up on collisions
const MAX_CODE_ATTEMPTS: usize = 16;

fn ensure_amount(initial_value: i64) -> Result<(), AppError> {
    if initial_value <= 0 {
        return Err(AppError::new(ErrorCode::InvalidVoucherAmount)
            .with_detail("initial_value", initial_value));
    }
    Ok(())
}

pub async fn get(state: &AppState, raw_code: &str) -> ServiceResult<Voucher> {
    let code = normalize_code(raw_code).map_err(|_| AppError::voucher_not_found(raw_code.trim()))?;
    let voucher = db::vouchers::find(&state.pool, &code)
        .await?
        .ok_or_else(|| AppError::voucher_not_found(&code))?;
    Ok(voucher)
}

pub async fn create(
    state: &AppState,
    user: &CurrentUser,
    raw_code: &str,
    initial_value: i64,
    expires_on: Option<NaiveDate>,
) -> ServiceResult<Voucher> {
    let code = normalize_code(raw_code)?;
    ensure_amount(initial_value)?;

    let now = shared::util::now_millis();
    db::vouchers::insert(&state.pool, &code, initial_value, expires_on, now)
        .await
        .map_err(on_unique(ErrorCode::VoucherCodeExists))?;

    tracing::info!(code = %code, initial_value, user = %user.username, "Voucher created");
    audit(
        &state.pool,
        Some(user.id),
        "voucher_created",
        json!({ "code": code, "initial_value": initial_value }),
        None,
    )
    .await;

    get(state, &code).await
}

/// Create `count` vouchers with random codes in one transaction
pub async fn generate(
    state: &AppState,
    user: &CurrentUser,
    count: u32,
    initial_value: i64,
    prefix: Option<&str>,
    expires_on: Option<NaiveDate>,
) -> ServiceResult<Vec<String>> {
    if !(1..=MAX_GENERATE).contains(&count) {
        return Err(AppError::with_message(
            ErrorCode::ValueOutOfRange,
            format!("count must be between 1 and {MAX_GENERATE}"),
        )
        .with_detail("field", "count")
        .into());
    }
    ensure_amount(initial_value)?;
    let prefix = normalize_prefix(prefix)?;

    let now = shared::util::now_millis();
    let mut tx = state.pool.begin().await?;
    let mut codes = Vec::with_capacity(count as usize);

    for _ in 0..count {
        let mut inserted = None;
        for _ in 0..MAX_CODE_ATTEMPTS {
            let code = generate_code(&mut rand::thread_rng(), prefix.as_deref());
            if db::vouchers::insert_if_absent(&mut *tx, &code, initial_value, expires_on, now).await? {
                inserted = Some(code);
                break;
            }
        }
        let code = inserted
            .ok_or_else(|| AppError::internal("Could not find a free voucher code"))?;
        codes.push(code);
    }

    tx.commit().await?;

    tracing::info!(count, initial_value, user = %user.username, "Vouchers generated");
    audit(
        &state.pool,
        Some(user.id),
        "vouchers_generated",
        json!({ "count": count, "initial_value": initial_value, "prefix": prefix }),
        None,
    )
    .await;

    Ok(codes)
}

pub async fn update(
    state: &AppState,
    user: &CurrentUser,
    raw_code: &str,
    patch: VoucherUpdate,
) -> ServiceResult<Voucher> {
    let code = normalize_code(raw_code).map_err(|_| AppError::voucher_not_found(raw_code.trim()))?;

    let mut tx = state.pool.begin().await?;
    let current = db::vouchers::find_for_update(&mut *tx, &code)
        .await?
        .ok_or_else(|| AppError::voucher_not_found(&code))?;

    let detail = serde_json::to_value(&patch).unwrap_or_default();
    let updated = apply_update(current, patch)?;
    db::vouchers::update_details(&mut *tx, &updated).await?;
    tx.commit().await?;

    tracing::info!(code = %code, status = %updated.status, user = %user.username, "Voucher updated");
    audit(
        &state.pool,
        Some(user.id),
        "voucher_updated",
        json!({ "code": code, "changes": detail }),
        None,
    )
    .await;

    Ok(updated)
}

/// Delete a voucher that has never been redeemed
pub async fn delete(state: &AppState, user: &CurrentUser, raw_code: &str) -> ServiceResult<()> {
    let code = normalize_code(raw_code).map_err(|_| AppError::voucher_not_found(raw_code.trim()))?;

    let mut tx = state.pool.begin().await?;
    db::vouchers::find_for_update(&mut *tx, &code)
        .await?
        .ok_or_else(|| AppError::voucher_not_found(&code))?;

    let has_transactions = AppError::new(ErrorCode::VoucherHasTransactions)
        .with_detail("code", code.as_str());
    if db::transactions::exists_for_voucher(&mut *tx, &code).await? {
        return Err(has_transactions.into());
    }
    db::vouchers::delete(&mut *tx, &code)
        .await
        .map_err(on_foreign_key(has_transactions))?;
    tx.commit().await?;

    tracing::info!(code = %code, user = %user.username, "Voucher deleted");
    audit(&state.pool, Some(user.id), "voucher_deleted", json!({ "code": code }), None).await;
    Ok(())
}

#[derive(Debug, Clone, Serialize)]
pub struct Assignment {
    pub seller_id: i64,
    pub sold_on: NaiveDate,
    pub codes: Vec<String>,
}

/// Hand unassigned vouchers to an accepted seller, all or nothing
pub async fn assign(
    state: &AppState,
    user: &CurrentUser,
    seller_id: i64,
    raw_codes: &[String],
) -> ServiceResult<Assignment> {
    let mut codes = Vec::with_capacity(raw_codes.len());
    for raw in raw_codes {
        let code = normalize_code(raw)?;
        if !codes.contains(&code) {
            codes.push(code);
        }
    }
    if codes.is_empty() {
        return Err(AppError::new(ErrorCode::RequiredField)
            .with_detail("field", "codes")
            .into());
    }

    let today = state.today();
    let mut tx = state.pool.begin().await?;

    let seller = db::sellers::find_for_update(&mut *tx, seller_id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::SellerNotFound).with_detail("seller_id", seller_id))?;
    if !seller.is_accepted() {
        return Err(AppError::new(ErrorCode::SellerNotAccepted)
            .with_detail("seller_id", seller_id)
            .into());
    }

    let found = db::vouchers::find_many_for_update(&mut *tx, &codes).await?;
    for code in &codes {
        match found.iter().find(|v| &v.code == code) {
            None => return Err(AppError::voucher_not_found(code).into()),
            Some(v) if v.seller_id.is_some() => {
                return Err(AppError::new(ErrorCode::VoucherAlreadyAssigned)
                    .with_detail("code", code.as_str())
                    .into());
            }
            Some(_) => {}
        }
    }

    db::vouchers::assign(&mut *tx, &codes, seller_id, today).await?;
    tx.commit().await?;

    tracing::info!(
        seller_id,
        count = codes.len(),
        user = %user.username,
        "Vouchers assigned to seller"
    );
    audit(
        &state.pool,
        Some(user.id),
        "vouchers_assigned",
        json!({ "seller_id": seller_id, "codes": codes }),
        None,
    )
    .await;

    Ok(Assignment {
        seller_id,
        sold_on: today,
        codes,
    })
}
