//! Transaction (ledger) Model

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::voucher::VoucherStatus;

/// Stall branch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(type_name = "branch", rename_all = "snake_case"))]
pub enum Branch {
    Sedati,
    Tawangsari,
}

impl Branch {
    pub const ALL: [Branch; 2] = [Branch::Sedati, Branch::Tawangsari];

    pub fn as_str(&self) -> &'static str {
        match self {
            Branch::Sedati => "sedati",
            Branch::Tawangsari => "tawangsari",
        }
    }
}

impl std::fmt::Display for Branch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One priced line of a sale, as stored in the ledger
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderLine {
    pub menu_item_id: i64,
    pub name: String,
    pub qty: i32,
    pub unit_price: i64,
}

impl OrderLine {
    /// `None` on overflow
    pub fn subtotal(&self) -> Option<i64> {
        i64::from(self.qty).checked_mul(self.unit_price)
    }
}

/// Line as sent by the cashier; the price comes from the menu
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderLineInput {
    pub menu_item_id: i64,
    pub qty: i32,
}

/// Ledger row. Append-only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Transaction {
    pub id: i64,
    pub voucher_code: String,
    pub branch: Branch,
    #[cfg_attr(feature = "db", sqlx(json))]
    pub items: Vec<OrderLine>,
    /// Order total
    pub amount: i64,
    /// Part paid from the voucher balance
    pub voucher_amount: i64,
    /// Part paid in cash
    pub cash_amount: i64,
    pub cashier_id: i64,
    pub created_at: i64,
}

/// Cashier request for a quote or a redemption
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RedeemRequest {
    pub code: String,
    pub branch: Branch,
    pub lines: Vec<OrderLineInput>,
}

/// Priced order against a voucher, nothing written
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quote {
    pub code: String,
    pub branch: Branch,
    pub lines: Vec<OrderLine>,
    pub total: i64,
    pub voucher_amount: i64,
    pub cash_amount: i64,
    pub balance_before: i64,
    pub balance_after: i64,
}

/// Result of a committed redemption
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Redemption {
    pub transaction: Transaction,
    pub balance: i64,
    pub status: VoucherStatus,
}

/// Admin ledger filter (query string)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TransactionFilter {
    /// Case-insensitive voucher code substring
    pub code: Option<String>,
    pub branch: Option<Branch>,
    /// Inclusive, business time zone
    pub from: Option<NaiveDate>,
    /// Inclusive, business time zone
    pub to: Option<NaiveDate>,
}

/// All ledger rows of one voucher
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VoucherHistory {
    pub code: String,
    pub transactions: Vec<Transaction>,
    pub count: usize,
    pub total_amount: i64,
}

impl VoucherHistory {
    pub fn new(code: String, transactions: Vec<Transaction>) -> Self {
        let total_amount = transactions.iter().map(|t| t.amount).sum();
        Self {
            code,
            count: transactions.len(),
            total_amount,
            transactions,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_branch_serde() {
        assert_eq!(
            serde_json::to_string(&Branch::Tawangsari).unwrap(),
            "\"tawangsari\""
        );
        assert!(serde_json::from_str::<Branch>("\"surabaya\"").is_err());
    }

    #[test]
    fn test_subtotal_overflow() {
        let line = OrderLine {
            menu_item_id: 1,
            name: "Nasi Goreng".into(),
            qty: 2,
            unit_price: i64::MAX / 2 + 1,
        };
        assert_eq!(line.subtotal(), None);
        let line = OrderLine { qty: 3, unit_price: 15_000, ..line };
        assert_eq!(line.subtotal(), Some(45_000));
    }

    #[test]
    fn test_history_totals() {
        let tx = |id, amount| Transaction {
            id,
            voucher_code: "ABC".into(),
            branch: Branch::Sedati,
            items: vec![],
            amount,
            voucher_amount: amount,
            cash_amount: 0,
            cashier_id: 1,
            created_at: 0,
        };
        let history = VoucherHistory::new("ABC".into(), vec![tx(1, 15_000), tx(2, 7_500)]);
        assert_eq!(history.count, 2);
        assert_eq!(history.total_amount, 22_500);
    }
}
