//! Cashier operations: eligibility check, menu, quote and redemption

use std::collections::HashMap;

use shared::error::AppError;
use shared::models::{
    Branch, BranchMenuItem, MenuItem, OrderLineInput, Quote, RedeemRequest, Redemption, Voucher,
};
use shared::voucher::{PricedOrder, ensure_redeemable, merge_lines, normalize_code, price_lines, settle};
use sqlx::PgExecutor;

use crate::auth::CurrentUser;
use crate::db;
use crate::db::transactions::NewTransaction;
use crate::error::ServiceResult;
use crate::state::AppState;

/// Codes that cannot be normalised cannot exist either
fn lookup_code(raw: &str) -> Result<String, AppError> {
    normalize_code(raw).map_err(|_| AppError::voucher_not_found(raw.trim()))
}

/// Price an order from database prices; client prices are never used.
async fn price_order(
    db: impl PgExecutor<'_>,
    lines: &[OrderLineInput],
    branch: Branch,
) -> ServiceResult<PricedOrder> {
    let merged = merge_lines(lines)?;
    let ids: Vec<i64> = merged.iter().map(|line| line.menu_item_id).collect();
    let items = db::menu::find_many(db, &ids).await?;
    let by_id: HashMap<i64, &MenuItem> = items.iter().map(|item| (item.id, item)).collect();
    Ok(price_lines(&merged, branch, |id| by_id.get(&id).copied())?)
}

/// Return the voucher if it can be used today
pub async fn check(state: &AppState, raw_code: &str) -> ServiceResult<Voucher> {
    let code = lookup_code(raw_code)?;
    let voucher = db::vouchers::find(&state.pool, &code).await?;
    ensure_redeemable(voucher.as_ref(), &code, state.today())?;
    Ok(voucher.ok_or_else(|| AppError::voucher_not_found(&code))?)
}

/// Menu items sold at `branch`, ordered by category then name
pub async fn menu(
    state: &AppState,
    branch: Branch,
    search: Option<&str>,
) -> ServiceResult<Vec<BranchMenuItem>> {
    let search = search.map(str::trim).filter(|s| !s.is_empty());
    let items = db::menu::list(&state.pool, search).await?;
    Ok(items.iter().filter_map(|item| item.for_branch(branch)).collect())
}

/// Price an order against a voucher without writing anything
pub async fn quote(state: &AppState, req: &RedeemRequest) -> ServiceResult<Quote> {
    let voucher = check(state, &req.code).await?;
    let order = price_order(&state.pool, &req.lines, req.branch).await?;
    let settlement = settle(voucher.balance, order.total);

    Ok(Quote {
        code: voucher.code,
        branch: req.branch,
        lines: order.lines,
        total: settlement.total,
        voucher_amount: settlement.voucher_amount,
        cash_amount: settlement.cash_amount,
        balance_before: voucher.balance,
        balance_after: settlement.balance_after,
    })
}

/// Redeem an order against a voucher.
///
/// Runs in one transaction with the voucher row locked: eligibility,
/// pricing, settlement, the ledger append and the menu sold counters
/// all commit together or not at all.
pub async fn redeem(
    state: &AppState,
    cashier: &CurrentUser,
    req: &RedeemRequest,
) -> ServiceResult<Redemption> {
    let code = lookup_code(&req.code)?;
    let today = state.today();

    let mut tx = state.pool.begin().await?;
    let locked = db::vouchers::find_for_update(&mut *tx, &code).await?;
    let voucher = ensure_redeemable(locked.as_ref(), &code, today)?;

    let order = price_order(&mut *tx, &req.lines, req.branch).await?;
    let settlement = settle(voucher.balance, order.total);

    db::vouchers::apply_redemption(
        &mut *tx,
        &code,
        settlement.balance_after,
        settlement.status_after,
        settlement.cash_amount,
    )
    .await?;

    let transaction = db::transactions::insert(
        &mut *tx,
        &NewTransaction {
            voucher_code: &code,
            branch: req.branch,
            items: &order.lines,
            amount: settlement.total,
            voucher_amount: settlement.voucher_amount,
            cash_amount: settlement.cash_amount,
            cashier_id: cashier.id,
            created_at: shared::util::now_millis(),
        },
    )
    .await?;

    for line in &order.lines {
        db::menu::add_sold(&mut *tx, line.menu_item_id, req.branch, i64::from(line.qty)).await?;
    }

    tx.commit().await?;

    tracing::info!(
        code = %code,
        branch = %req.branch,
        amount = settlement.total,
        voucher_amount = settlement.voucher_amount,
        cash_amount = settlement.cash_amount,
        balance = settlement.balance_after,
        cashier = %cashier.username,
        "Voucher redeemed"
    );

    Ok(Redemption {
        transaction,
        balance: settlement.balance_after,
        status: settlement.status_after,
    })
}
