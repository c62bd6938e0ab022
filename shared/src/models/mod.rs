//! Data models
//!
//! Shared between voucher-server and its clients (via API).
//! DB row types use `#[cfg_attr(feature = "db", derive(sqlx::FromRow))]`.
//! Money is whole rupiah in `i64`; timestamps are Unix millis.

pub mod audit;
pub mod menu;
pub mod page;
pub mod seller;
pub mod transaction;
pub mod user;
pub mod voucher;

// Re-exports
pub use audit::*;
pub use menu::*;
pub use page::*;
pub use seller::*;
pub use transaction::*;
pub use user::*;
pub use voucher::*;

/// Deserializer for patch fields that tell "absent" from "null".
///
/// Use with `#[serde(default, deserialize_with = "nullable")]` on an
/// `Option<Option<T>>`: absent → `None`, `null` → `Some(None)`.
pub fn nullable<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: serde::Deserialize<'de>,
    D: serde::Deserializer<'de>,
{
    serde::Deserialize::deserialize(deserializer).map(Some)
}
