//! Voucher Model

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::nullable;

/// Voucher lifecycle state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(
    feature = "db",
    sqlx(type_name = "voucher_status", rename_all = "snake_case")
)]
pub enum VoucherStatus {
    /// Created, not yet sold to a buyer
    Inactive,
    /// Sold and usable
    Active,
    /// Balance used up
    SoldOut,
}

impl VoucherStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            VoucherStatus::Inactive => "inactive",
            VoucherStatus::Active => "active",
            VoucherStatus::SoldOut => "sold_out",
        }
    }

    /// Parse a comma-separated list such as `active,sold_out`.
    ///
    /// Returns `None` if any entry is unknown. Blank entries are skipped.
    pub fn parse_list(s: &str) -> Option<Vec<VoucherStatus>> {
        s.split(',')
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .map(|part| part.parse().ok())
            .collect()
    }
}

impl std::fmt::Display for VoucherStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for VoucherStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "inactive" => Ok(VoucherStatus::Inactive),
            "active" => Ok(VoucherStatus::Active),
            "sold_out" => Ok(VoucherStatus::SoldOut),
            other => Err(format!("unknown voucher status: {other}")),
        }
    }
}

/// Voucher entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Voucher {
    pub code: String,
    pub initial_value: i64,
    pub balance: i64,
    pub status: VoucherStatus,
    pub buyer_name: Option<String>,
    pub buyer_phone: Option<String>,
    pub seller_id: Option<i64>,
    /// Joined from sellers, read-only
    pub seller_name: Option<String>,
    pub sold_on: Option<NaiveDate>,
    pub activated_on: Option<NaiveDate>,
    /// Last valid day (inclusive)
    pub expires_on: Option<NaiveDate>,
    /// Cash paid on top of the balance across all redemptions
    pub cash_collected: i64,
    pub created_at: i64,
}

impl Voucher {
    /// Value already spent from the voucher
    pub fn used_value(&self) -> i64 {
        self.initial_value - self.balance
    }
}

/// Partial admin edit. Balance and initial value are not editable.
///
/// For optional fields an explicit `null` clears the value and an absent
/// field leaves it unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VoucherUpdate {
    #[serde(default, deserialize_with = "nullable")]
    pub buyer_name: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    pub buyer_phone: Option<Option<String>>,
    pub status: Option<VoucherStatus>,
    #[serde(default, deserialize_with = "nullable")]
    pub sold_on: Option<Option<NaiveDate>>,
    #[serde(default, deserialize_with = "nullable")]
    pub activated_on: Option<Option<NaiveDate>>,
    #[serde(default, deserialize_with = "nullable")]
    pub expires_on: Option<Option<NaiveDate>>,
}

/// Admin voucher list filter (query string)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VoucherFilter {
    /// Comma-separated statuses, any of
    pub status: Option<String>,
    /// Case-insensitive code substring
    pub code: Option<String>,
    pub min_value: Option<i64>,
    pub max_value: Option<i64>,
    pub seller_id: Option<i64>,
    /// Only vouchers without a seller
    #[serde(default)]
    pub unassigned: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_serde() {
        assert_eq!(
            serde_json::to_string(&VoucherStatus::SoldOut).unwrap(),
            "\"sold_out\""
        );
        let status: VoucherStatus = serde_json::from_str("\"active\"").unwrap();
        assert_eq!(status, VoucherStatus::Active);
    }

    #[test]
    fn test_parse_list() {
        assert_eq!(
            VoucherStatus::parse_list("active, SOLD_OUT"),
            Some(vec![VoucherStatus::Active, VoucherStatus::SoldOut])
        );
        assert_eq!(VoucherStatus::parse_list(""), Some(vec![]));
        assert_eq!(VoucherStatus::parse_list("active,bogus"), None);
    }

    #[test]
    fn test_update_distinguishes_null_from_absent() {
        let patch: VoucherUpdate =
            serde_json::from_str(r#"{"buyer_name": null, "status": "active"}"#).unwrap();
        assert_eq!(patch.buyer_name, Some(None));
        assert_eq!(patch.buyer_phone, None);
        assert_eq!(patch.status, Some(VoucherStatus::Active));

        let patch: VoucherUpdate =
            serde_json::from_str(r#"{"expires_on": "2025-01-31"}"#).unwrap();
        assert_eq!(
            patch.expires_on,
            Some(Some(NaiveDate::from_ymd_opt(2025, 1, 31).unwrap()))
        );
    }
}
