//! Audit log operations

use shared::models::AuditEntry;
use sqlx::PgPool;

/// Write an audit log entry
pub async fn log(
    pool: &PgPool,
    user_id: Option<i64>,
    action: &str,
    detail: &serde_json::Value,
    ip_address: Option<&str>,
    now: i64,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        "INSERT INTO audit_logs (user_id, action, detail, ip_address, created_at) \
         VALUES ($1, $2, $3, $4, $5)",
    )
    .bind(user_id)
    .bind(action)
    .bind(detail)
    .bind(ip_address)
    .bind(now)
    .execute(pool)
    .await?;
    Ok(())
}

/// Audit entries, newest first, plus the total count
pub async fn query(
    pool: &PgPool,
    limit: i64,
    offset: i64,
) -> Result<(Vec<AuditEntry>, i64), sqlx::Error> {
    let rows: Vec<AuditEntry> = sqlx::query_as(
        "SELECT a.id, a.user_id, u.username, a.action, a.detail, a.ip_address, a.created_at \
         FROM audit_logs a LEFT JOIN users u ON u.id = a.user_id \
         ORDER BY a.created_at DESC, a.id DESC LIMIT $1 OFFSET $2",
    )
    .bind(limit)
    .bind(offset)
    .fetch_all(pool)
    .await?;

    let (total,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM audit_logs")
        .fetch_one(pool)
        .await?;

    Ok((rows, total))
}
