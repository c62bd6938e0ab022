//! Business operations spanning several queries
//!
//! Each mutating operation runs in one database transaction. Audit
//! entries are written after commit and never fail the operation.

pub mod activation;
pub mod bootstrap;
pub mod menu;
pub mod redemption;
pub mod sellers;
pub mod users;
pub mod vouchers;

use sqlx::PgPool;

/// Record an audit entry, logging (not returning) any failure
pub async fn audit(
    pool: &PgPool,
    user_id: Option<i64>,
    action: &str,
    detail: serde_json::Value,
    ip_address: Option<&str>,
) {
    let now = shared::util::now_millis();
    if let Err(e) = crate::db::audit::log(pool, user_id, action, &detail, ip_address, now).await {
        tracing::warn!(action, error = %e, "Failed to write audit entry");
    }
}
