//! Transaction ledger queries (append-only)

use shared::models::{Branch, OrderLine, Transaction};
use sqlx::types::Json;
use sqlx::{PgExecutor, PgPool};

const COLUMNS: &str =
    "id, voucher_code, branch, items, amount, voucher_amount, cash_amount, cashier_id, created_at";

const FILTER: &str = "WHERE ($1::text IS NULL OR strpos(voucher_code, upper($1)) > 0) \
     AND ($2::branch IS NULL OR branch = $2) \
     AND ($3::bigint IS NULL OR created_at >= $3) \
     AND ($4::bigint IS NULL OR created_at < $4)";

/// Ledger row to append
pub struct NewTransaction<'a> {
    pub voucher_code: &'a str,
    pub branch: Branch,
    pub items: &'a [OrderLine],
    pub amount: i64,
    pub voucher_amount: i64,
    pub cash_amount: i64,
    pub cashier_id: i64,
    pub created_at: i64,
}

pub async fn insert(
    db: impl PgExecutor<'_>,
    tx: &NewTransaction<'_>,
) -> Result<Transaction, sqlx::Error> {
    sqlx::query_as(&format!(
        "INSERT INTO transactions \
         (voucher_code, branch, items, amount, voucher_amount, cash_amount, cashier_id, created_at) \
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8) RETURNING {COLUMNS}"
    ))
    .bind(tx.voucher_code)
    .bind(tx.branch)
    .bind(Json(tx.items))
    .bind(tx.amount)
    .bind(tx.voucher_amount)
    .bind(tx.cash_amount)
    .bind(tx.cashier_id)
    .bind(tx.created_at)
    .fetch_one(db)
    .await
}

/// Ledger filter after date bounds are resolved to milliseconds
#[derive(Debug, Default, Clone)]
pub struct LedgerFilter<'a> {
    pub code: Option<&'a str>,
    pub branch: Option<Branch>,
    pub start: Option<i64>,
    pub end: Option<i64>,
}

/// One page of ledger rows, newest first, plus the total match count
pub async fn list(
    pool: &PgPool,
    filter: &LedgerFilter<'_>,
    limit: i64,
    offset: i64,
) -> Result<(Vec<Transaction>, i64), sqlx::Error> {
    let items: Vec<Transaction> = sqlx::query_as(&format!(
        "SELECT {COLUMNS} FROM transactions {FILTER} \
         ORDER BY created_at DESC, id DESC LIMIT $5 OFFSET $6"
    ))
    .bind(filter.code)
    .bind(filter.branch)
    .bind(filter.start)
    .bind(filter.end)
    .bind(limit)
    .bind(offset)
    .fetch_all(pool)
    .await?;

    let (total,): (i64,) = sqlx::query_as(&format!("SELECT COUNT(*) FROM transactions {FILTER}"))
        .bind(filter.code)
        .bind(filter.branch)
        .bind(filter.start)
        .bind(filter.end)
        .fetch_one(pool)
        .await?;

    Ok((items, total))
}

/// Every ledger row matching `filter`, oldest first
pub async fn list_matching(
    pool: &PgPool,
    filter: &LedgerFilter<'_>,
) -> Result<Vec<Transaction>, sqlx::Error> {
    sqlx::query_as(&format!(
        "SELECT {COLUMNS} FROM transactions {FILTER} ORDER BY created_at, id"
    ))
    .bind(filter.code)
    .bind(filter.branch)
    .bind(filter.start)
    .bind(filter.end)
    .fetch_all(pool)
    .await
}

pub async fn list_by_voucher(pool: &PgPool, code: &str) -> Result<Vec<Transaction>, sqlx::Error> {
    sqlx::query_as(&format!(
        "SELECT {COLUMNS} FROM transactions WHERE voucher_code = $1 ORDER BY created_at, id"
    ))
    .bind(code)
    .fetch_all(pool)
    .await
}

pub async fn exists_for_voucher(db: impl PgExecutor<'_>, code: &str) -> Result<bool, sqlx::Error> {
    let (exists,): (bool,) =
        sqlx::query_as("SELECT EXISTS (SELECT 1 FROM transactions WHERE voucher_code = $1)")
            .bind(code)
            .fetch_one(db)
            .await?;
    Ok(exists)
}
