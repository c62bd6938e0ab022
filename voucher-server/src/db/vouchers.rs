//! Voucher registry queries

use chrono::NaiveDate;
use shared::models::{Voucher, VoucherFilter, VoucherStatus};
use sqlx::{PgExecutor, PgPool};

const SELECT: &str = "SELECT v.code, v.initial_value, v.balance, v.status, v.buyer_name, \
     v.buyer_phone, v.seller_id, s.name AS seller_name, v.sold_on, v.activated_on, \
     v.expires_on, v.cash_collected, v.created_at \
     FROM vouchers v LEFT JOIN sellers s ON s.id = v.seller_id";

const FILTER: &str = "WHERE ($1::voucher_status[] IS NULL OR v.status = ANY($1)) \
     AND ($2::text IS NULL OR strpos(v.code, upper($2)) > 0) \
     AND ($3::bigint IS NULL OR v.initial_value >= $3) \
     AND ($4::bigint IS NULL OR v.initial_value <= $4) \
     AND ($5::bigint IS NULL OR v.seller_id = $5) \
     AND (NOT $6 OR v.seller_id IS NULL)";

pub async fn find(db: impl PgExecutor<'_>, code: &str) -> Result<Option<Voucher>, sqlx::Error> {
    sqlx::query_as(&format!("{SELECT} WHERE v.code = $1"))
        .bind(code)
        .fetch_optional(db)
        .await
}

/// Load and lock a voucher row for the rest of the transaction
pub async fn find_for_update(
    db: impl PgExecutor<'_>,
    code: &str,
) -> Result<Option<Voucher>, sqlx::Error> {
    sqlx::query_as(&format!("{SELECT} WHERE v.code = $1 FOR UPDATE OF v"))
        .bind(code)
        .fetch_optional(db)
        .await
}

/// Lock several voucher rows, ordered by code
pub async fn find_many_for_update(
    db: impl PgExecutor<'_>,
    codes: &[String],
) -> Result<Vec<Voucher>, sqlx::Error> {
    sqlx::query_as(&format!(
        "{SELECT} WHERE v.code = ANY($1) ORDER BY v.code FOR UPDATE OF v"
    ))
    .bind(codes)
    .fetch_all(db)
    .await
}

/// One page of vouchers matching `filter`, ordered by code, plus the
/// total match count.
pub async fn list(
    pool: &PgPool,
    statuses: Option<&[VoucherStatus]>,
    filter: &VoucherFilter,
    limit: i64,
    offset: i64,
) -> Result<(Vec<Voucher>, i64), sqlx::Error> {
    let code = filter.code.as_deref().map(str::trim).filter(|c| !c.is_empty());

    let items: Vec<Voucher> = sqlx::query_as(&format!(
        "{SELECT} {FILTER} ORDER BY v.code LIMIT $7 OFFSET $8"
    ))
    .bind(statuses)
    .bind(code)
    .bind(filter.min_value)
    .bind(filter.max_value)
    .bind(filter.seller_id)
    .bind(filter.unassigned)
    .bind(limit)
    .bind(offset)
    .fetch_all(pool)
    .await?;

    let (total,): (i64,) = sqlx::query_as(&format!("SELECT COUNT(*) FROM vouchers v {FILTER}"))
        .bind(statuses)
        .bind(code)
        .bind(filter.min_value)
        .bind(filter.max_value)
        .bind(filter.seller_id)
        .bind(filter.unassigned)
        .fetch_one(pool)
        .await?;

    Ok((items, total))
}

/// Every voucher, ordered by code
pub async fn list_all(pool: &PgPool) -> Result<Vec<Voucher>, sqlx::Error> {
    sqlx::query_as(&format!("{SELECT} ORDER BY v.code"))
        .fetch_all(pool)
        .await
}

/// Vouchers created within `[start, end)` (open ends allowed)
pub async fn list_created_between(
    pool: &PgPool,
    start: Option<i64>,
    end: Option<i64>,
) -> Result<Vec<Voucher>, sqlx::Error> {
    sqlx::query_as(&format!(
        "{SELECT} WHERE ($1::bigint IS NULL OR v.created_at >= $1) \
         AND ($2::bigint IS NULL OR v.created_at < $2) ORDER BY v.code"
    ))
    .bind(start)
    .bind(end)
    .fetch_all(pool)
    .await
}

/// Vouchers carried by a seller: not yet sold first, then newest sale
pub async fn list_by_seller(pool: &PgPool, seller_id: i64) -> Result<Vec<Voucher>, sqlx::Error> {
    sqlx::query_as(&format!(
        "{SELECT} WHERE v.seller_id = $1 \
         ORDER BY (v.status = 'inactive') DESC, v.sold_on DESC NULLS LAST, v.code"
    ))
    .bind(seller_id)
    .fetch_all(pool)
    .await
}

pub async fn count_by_seller(db: impl PgExecutor<'_>, seller_id: i64) -> Result<i64, sqlx::Error> {
    let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM vouchers WHERE seller_id = $1")
        .bind(seller_id)
        .fetch_one(db)
        .await?;
    Ok(count)
}

/// Insert a fresh voucher: full balance, inactive, unassigned
pub async fn insert(
    db: impl PgExecutor<'_>,
    code: &str,
    initial_value: i64,
    expires_on: Option<NaiveDate>,
    now: i64,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        "INSERT INTO vouchers (code, initial_value, balance, status, expires_on, created_at) \
         VALUES ($1, $2, $2, 'inactive', $3, $4)",
    )
    .bind(code)
    .bind(initial_value)
    .bind(expires_on)
    .bind(now)
    .execute(db)
    .await?;
    Ok(())
}

/// Insert unless the code is taken; returns whether a row was written
pub async fn insert_if_absent(
    db: impl PgExecutor<'_>,
    code: &str,
    initial_value: i64,
    expires_on: Option<NaiveDate>,
    now: i64,
) -> Result<bool, sqlx::Error> {
    let result = sqlx::query(
        "INSERT INTO vouchers (code, initial_value, balance, status, expires_on, created_at) \
         VALUES ($1, $2, $2, 'inactive', $3, $4) ON CONFLICT (code) DO NOTHING",
    )
    .bind(code)
    .bind(initial_value)
    .bind(expires_on)
    .bind(now)
    .execute(db)
    .await?;
    Ok(result.rows_affected() == 1)
}

/// Write the editable fields of `voucher`. Balance, initial value,
/// seller and cash total are never touched here.
pub async fn update_details(db: impl PgExecutor<'_>, voucher: &Voucher) -> Result<(), sqlx::Error> {
    sqlx::query(
        "UPDATE vouchers SET buyer_name = $2, buyer_phone = $3, status = $4, \
         sold_on = $5, activated_on = $6, expires_on = $7 WHERE code = $1",
    )
    .bind(&voucher.code)
    .bind(&voucher.buyer_name)
    .bind(&voucher.buyer_phone)
    .bind(voucher.status)
    .bind(voucher.sold_on)
    .bind(voucher.activated_on)
    .bind(voucher.expires_on)
    .execute(db)
    .await?;
    Ok(())
}

pub async fn assign(
    db: impl PgExecutor<'_>,
    codes: &[String],
    seller_id: i64,
    sold_on: NaiveDate,
) -> Result<u64, sqlx::Error> {
    let result = sqlx::query(
        "UPDATE vouchers SET seller_id = $1, sold_on = $2 \
         WHERE code = ANY($3) AND seller_id IS NULL",
    )
    .bind(seller_id)
    .bind(sold_on)
    .bind(codes)
    .execute(db)
    .await?;
    Ok(result.rows_affected())
}

/// Apply a settled redemption to the voucher row
pub async fn apply_redemption(
    db: impl PgExecutor<'_>,
    code: &str,
    balance: i64,
    status: VoucherStatus,
    cash_amount: i64,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        "UPDATE vouchers SET balance = $2, status = $3, cash_collected = cash_collected + $4 \
         WHERE code = $1",
    )
    .bind(code)
    .bind(balance)
    .bind(status)
    .bind(cash_amount)
    .execute(db)
    .await?;
    Ok(())
}

pub async fn delete(db: impl PgExecutor<'_>, code: &str) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM vouchers WHERE code = $1")
        .bind(code)
        .execute(db)
        .await?;
    Ok(result.rows_affected() > 0)
}
