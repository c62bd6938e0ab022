//! Seller-side voucher operations

use serde_json::json;
use shared::error::AppError;
use shared::models::Voucher;
use shared::voucher::{activate as activate_voucher, ensure_activatable, normalize_code};

use super::audit;
use crate::auth::CurrentUser;
use crate::db;
use crate::error::ServiceResult;
use crate::state::AppState;

/// Sell an assigned voucher to a buyer.
///
/// The voucher row is locked for the duration of the checks so two
/// activations of the same code cannot both succeed.
pub async fn activate(
    state: &AppState,
    user: &CurrentUser,
    raw_code: &str,
    buyer_name: &str,
    buyer_phone: &str,
) -> ServiceResult<Voucher> {
    let seller_id = user.require_seller()?;
    let code = normalize_code(raw_code).map_err(|_| AppError::voucher_not_found(raw_code.trim()))?;
    let today = state.today();

    let mut tx = state.pool.begin().await?;
    let voucher = db::vouchers::find_for_update(&mut *tx, &code)
        .await?
        .ok_or_else(|| AppError::voucher_not_found(&code))?;

    let seller = match voucher.seller_id {
        Some(assigned) => db::sellers::find(&mut *tx, assigned).await?,
        None => None,
    };
    ensure_activatable(&voucher, seller_id, seller.as_ref())?;

    let voucher = activate_voucher(voucher, buyer_name, buyer_phone, today)?;
    db::vouchers::update_details(&mut *tx, &voucher).await?;
    tx.commit().await?;

    tracing::info!(
        code = %voucher.code,
        seller_id,
        activated_on = %today,
        "Voucher activated"
    );
    audit(
        &state.pool,
        Some(user.id),
        "voucher_activated",
        json!({ "code": voucher.code, "seller_id": seller_id }),
        None,
    )
    .await;

    Ok(voucher)
}

/// Vouchers carried by the session's seller
pub async fn my_vouchers(state: &AppState, user: &CurrentUser) -> ServiceResult<Vec<Voucher>> {
    let seller_id = user.require_seller()?;
    Ok(db::vouchers::list_by_seller(&state.pool, seller_id).await?)
}

/// One of the session seller's vouchers. Vouchers of other sellers are
/// reported as not found.
pub async fn my_voucher(
    state: &AppState,
    user: &CurrentUser,
    raw_code: &str,
) -> ServiceResult<Voucher> {
    let seller_id = user.require_seller()?;
    let voucher = super::vouchers::get(state, raw_code).await?;
    if voucher.seller_id != Some(seller_id) {
        return Err(AppError::voucher_not_found(&voucher.code).into());
    }
    Ok(voucher)
}
