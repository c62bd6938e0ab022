//! Seller Model

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(
    feature = "db",
    sqlx(type_name = "seller_status", rename_all = "snake_case")
)]
pub enum SellerStatus {
    /// Registered, waiting for admin review
    Pending,
    Accepted,
}

/// Seller entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Seller {
    pub id: i64,
    pub name: String,
    pub phone: String,
    pub status: SellerStatus,
    pub created_at: i64,
}

impl Seller {
    pub fn is_accepted(&self) -> bool {
        self.status == SellerStatus::Accepted
    }
}

/// Seller list filter
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SellerFilter {
    pub status: Option<SellerStatus>,
}
