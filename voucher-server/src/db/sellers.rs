//! Seller queries

use shared::models::{Seller, SellerStatus};
use sqlx::{PgExecutor, PgPool};

pub async fn create(
    db: impl PgExecutor<'_>,
    name: &str,
    phone: &str,
    now: i64,
) -> Result<Seller, sqlx::Error> {
    sqlx::query_as(
        "INSERT INTO sellers (name, phone, status, created_at) VALUES ($1, $2, 'pending', $3) \
         RETURNING id, name, phone, status, created_at",
    )
    .bind(name)
    .bind(phone)
    .bind(now)
    .fetch_one(db)
    .await
}

pub async fn find(db: impl PgExecutor<'_>, id: i64) -> Result<Option<Seller>, sqlx::Error> {
    sqlx::query_as("SELECT id, name, phone, status, created_at FROM sellers WHERE id = $1")
        .bind(id)
        .fetch_optional(db)
        .await
}

/// Load and lock a seller row
pub async fn find_for_update(
    db: impl PgExecutor<'_>,
    id: i64,
) -> Result<Option<Seller>, sqlx::Error> {
    sqlx::query_as(
        "SELECT id, name, phone, status, created_at FROM sellers WHERE id = $1 FOR UPDATE",
    )
    .bind(id)
    .fetch_optional(db)
    .await
}

/// Sellers, newest registration first
pub async fn list(pool: &PgPool, status: Option<SellerStatus>) -> Result<Vec<Seller>, sqlx::Error> {
    sqlx::query_as(
        "SELECT id, name, phone, status, created_at FROM sellers \
         WHERE ($1::seller_status IS NULL OR status = $1) ORDER BY created_at DESC, id DESC",
    )
    .bind(status)
    .fetch_all(pool)
    .await
}

pub async fn set_status(
    db: impl PgExecutor<'_>,
    id: i64,
    status: SellerStatus,
) -> Result<(), sqlx::Error> {
    sqlx::query("UPDATE sellers SET status = $2 WHERE id = $1")
        .bind(id)
        .bind(status)
        .execute(db)
        .await?;
    Ok(())
}

pub async fn delete(db: impl PgExecutor<'_>, id: i64) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM sellers WHERE id = $1")
        .bind(id)
        .execute(db)
        .await?;
    Ok(result.rows_affected() > 0)
}
