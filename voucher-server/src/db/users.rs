//! User account queries

use shared::models::{Role, User};
use sqlx::{PgExecutor, PgPool};

const COLUMNS: &str = "id, username, hashed_password, role, seller_id, is_active, created_at";

pub async fn find_by_username(pool: &PgPool, username: &str) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as(&format!("SELECT {COLUMNS} FROM users WHERE username = $1"))
        .bind(username)
        .fetch_optional(pool)
        .await
}

pub async fn list(pool: &PgPool) -> Result<Vec<User>, sqlx::Error> {
    sqlx::query_as(&format!("SELECT {COLUMNS} FROM users ORDER BY role, username"))
        .fetch_all(pool)
        .await
}

pub async fn create(
    db: impl PgExecutor<'_>,
    username: &str,
    hashed_password: &str,
    role: Role,
    seller_id: Option<i64>,
    now: i64,
) -> Result<User, sqlx::Error> {
    sqlx::query_as(&format!(
        "INSERT INTO users (username, hashed_password, role, seller_id, is_active, created_at) \
         VALUES ($1, $2, $3, $4, TRUE, $5) RETURNING {COLUMNS}"
    ))
    .bind(username)
    .bind(hashed_password)
    .bind(role)
    .bind(seller_id)
    .bind(now)
    .fetch_one(db)
    .await
}

/// Update password and/or active flag; `None` keeps the current value
pub async fn update(
    db: impl PgExecutor<'_>,
    id: i64,
    hashed_password: Option<&str>,
    is_active: Option<bool>,
) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as(&format!(
        "UPDATE users SET hashed_password = COALESCE($2, hashed_password), \
         is_active = COALESCE($3, is_active) WHERE id = $1 RETURNING {COLUMNS}"
    ))
    .bind(id)
    .bind(hashed_password)
    .bind(is_active)
    .fetch_optional(db)
    .await
}

pub async fn delete(db: impl PgExecutor<'_>, id: i64) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM users WHERE id = $1")
        .bind(id)
        .execute(db)
        .await?;
    Ok(result.rows_affected() > 0)
}

/// Remove the login accounts linked to a seller
pub async fn delete_by_seller(db: impl PgExecutor<'_>, seller_id: i64) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("DELETE FROM users WHERE seller_id = $1")
        .bind(seller_id)
        .execute(db)
        .await?;
    Ok(result.rows_affected())
}

pub async fn admin_exists(pool: &PgPool) -> Result<bool, sqlx::Error> {
    let (exists,): (bool,) =
        sqlx::query_as("SELECT EXISTS (SELECT 1 FROM users WHERE role = 'admin')")
            .fetch_one(pool)
            .await?;
    Ok(exists)
}
