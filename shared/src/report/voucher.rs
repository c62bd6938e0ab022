//! Voucher summary

use std::collections::{BTreeMap, HashSet};

use chrono::{FixedOffset, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::models::{Transaction, Voucher, VoucherStatus};
use crate::util::business_date;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusCount {
    pub status: VoucherStatus,
    pub count: usize,
}

/// Redemptions on one business day
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyUsage {
    pub date: NaiveDate,
    pub count: usize,
    pub amount: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoucherReport {
    pub total: usize,
    pub active: usize,
    /// Everything not active, sold out included
    pub inactive: usize,
    /// Vouchers with at least one transaction
    pub used: usize,
    /// Σ balance
    pub unused_value: i64,
    /// Σ (initial value − balance)
    pub used_value: i64,
    pub cash_collected: i64,
    pub by_status: Vec<StatusCount>,
    /// Oldest day first
    pub daily: Vec<DailyUsage>,
}

pub fn voucher_report(
    vouchers: &[Voucher],
    transactions: &[Transaction],
    offset: FixedOffset,
) -> VoucherReport {
    let count_status = |status: VoucherStatus| vouchers.iter().filter(|v| v.status == status).count();
    let by_status = [VoucherStatus::Inactive, VoucherStatus::Active, VoucherStatus::SoldOut]
        .into_iter()
        .map(|status| StatusCount {
            status,
            count: count_status(status),
        })
        .collect();

    let used: HashSet<&str> = transactions.iter().map(|t| t.voucher_code.as_str()).collect();

    let mut daily: BTreeMap<NaiveDate, (usize, i64)> = BTreeMap::new();
    for tx in transactions {
        let entry = daily.entry(business_date(tx.created_at, offset)).or_default();
        entry.0 += 1;
        entry.1 += tx.amount;
    }

    let active = count_status(VoucherStatus::Active);
    VoucherReport {
        total: vouchers.len(),
        active,
        inactive: vouchers.len() - active,
        used: used.len(),
        unused_value: vouchers.iter().map(|v| v.balance).sum(),
        used_value: vouchers.iter().map(Voucher::used_value).sum(),
        cash_collected: vouchers.iter().map(|v| v.cash_collected).sum(),
        by_status,
        daily: daily
            .into_iter()
            .map(|(date, (count, amount))| DailyUsage {
                date,
                count,
                amount,
            })
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Branch;
    use crate::util::business_offset;
    use chrono::{TimeZone, Utc};

    fn voucher(code: &str, initial: i64, balance: i64, status: VoucherStatus, cash: i64) -> Voucher {
        Voucher {
            code: code.into(),
            initial_value: initial,
            balance,
            status,
            buyer_name: None,
            buyer_phone: None,
            seller_id: None,
            seller_name: None,
            sold_on: None,
            activated_on: None,
            expires_on: None,
            cash_collected: cash,
            created_at: 0,
        }
    }

    fn tx(code: &str, amount: i64, utc_hour: u32, day: u32) -> Transaction {
        Transaction {
            id: 0,
            voucher_code: code.into(),
            branch: Branch::Sedati,
            items: vec![],
            amount,
            voucher_amount: amount,
            cash_amount: 0,
            cashier_id: 1,
            created_at: Utc
                .with_ymd_and_hms(2024, 5, day, utc_hour, 0, 0)
                .unwrap()
                .timestamp_millis(),
        }
    }

    #[test]
    fn test_voucher_report() {
        let vouchers = vec![
            voucher("A", 50_000, 50_000, VoucherStatus::Inactive, 0),
            voucher("B", 50_000, 20_000, VoucherStatus::Active, 0),
            voucher("C", 25_000, 0, VoucherStatus::SoldOut, 3_000),
        ];
        // 18:00 UTC on the 1st is already the 2nd in UTC+7
        let transactions = vec![
            tx("B", 30_000, 3, 2),
            tx("C", 20_000, 18, 1),
            tx("C", 8_000, 5, 3),
        ];

        let report = voucher_report(&vouchers, &transactions, business_offset(7));
        assert_eq!(report.total, 3);
        assert_eq!(report.active, 1);
        assert_eq!(report.inactive, 2);
        assert_eq!(report.active + report.inactive, report.total);
        assert_eq!(report.used, 2);
        assert_eq!(report.unused_value, 70_000);
        assert_eq!(report.used_value, 55_000);
        assert_eq!(report.cash_collected, 3_000);
        assert_eq!(
            report.by_status[2],
            StatusCount {
                status: VoucherStatus::SoldOut,
                count: 1
            }
        );

        let day = |d| NaiveDate::from_ymd_opt(2024, 5, d).unwrap();
        assert_eq!(
            report.daily,
            vec![
                DailyUsage { date: day(2), count: 2, amount: 50_000 },
                DailyUsage { date: day(3), count: 1, amount: 8_000 },
            ]
        );
    }

    #[test]
    fn test_empty_report() {
        let report = voucher_report(&[], &[], business_offset(7));
        assert_eq!(report.total, 0);
        assert!(report.daily.is_empty());
        assert!(report.by_status.iter().all(|s| s.count == 0));
    }
}
