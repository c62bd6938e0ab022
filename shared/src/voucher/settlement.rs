//! Splitting an order total between voucher balance and cash

use serde::{Deserialize, Serialize};

use crate::models::VoucherStatus;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settlement {
    pub total: i64,
    /// Taken from the balance
    pub voucher_amount: i64,
    /// Shortage paid in cash
    pub cash_amount: i64,
    pub balance_after: i64,
    pub status_after: VoucherStatus,
}

/// Settle `total` against `balance`.
///
/// The balance covers as much as it can and never goes below zero; the
/// rest is cash. A balance that reaches zero marks the voucher sold out.
pub fn settle(balance: i64, total: i64) -> Settlement {
    let balance = balance.max(0);
    let total = total.max(0);
    let voucher_amount = total.min(balance);
    let balance_after = balance - voucher_amount;

    Settlement {
        total,
        voucher_amount,
        cash_amount: total - voucher_amount,
        balance_after,
        status_after: if balance_after == 0 {
            VoucherStatus::SoldOut
        } else {
            VoucherStatus::Active
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_balance_covers_order() {
        let s = settle(50_000, 18_000);
        assert_eq!(s.voucher_amount, 18_000);
        assert_eq!(s.cash_amount, 0);
        assert_eq!(s.balance_after, 32_000);
        assert_eq!(s.status_after, VoucherStatus::Active);
    }

    #[test]
    fn test_exact_balance_sells_out() {
        let s = settle(25_000, 25_000);
        assert_eq!(s.balance_after, 0);
        assert_eq!(s.cash_amount, 0);
        assert_eq!(s.status_after, VoucherStatus::SoldOut);
    }

    #[test]
    fn test_shortage_paid_in_cash() {
        let s = settle(10_000, 27_500);
        assert_eq!(s.voucher_amount, 10_000);
        assert_eq!(s.cash_amount, 17_500);
        assert_eq!(s.balance_after, 0);
        assert_eq!(s.status_after, VoucherStatus::SoldOut);
    }

    #[test]
    fn test_never_negative() {
        let s = settle(-5, 1_000);
        assert_eq!(s.voucher_amount, 0);
        assert_eq!(s.cash_amount, 1_000);
        assert_eq!(s.balance_after, 0);
    }
}
