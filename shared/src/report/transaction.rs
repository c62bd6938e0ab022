//! Ledger summary over a filtered set of transactions

use std::collections::HashMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::TOP_N;
use crate::models::{Branch, Transaction};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BranchSummary {
    pub branch: Branch,
    pub count: usize,
    pub amount: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoucherUsage {
    pub code: String,
    pub count: usize,
    pub amount: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuUsage {
    pub name: String,
    pub qty: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionReport {
    pub count: usize,
    pub total_amount: i64,
    pub voucher_amount: i64,
    pub cash_amount: i64,
    /// Mean order total, 2 decimal places
    pub average_amount: Decimal,
    pub by_branch: Vec<BranchSummary>,
    /// Most transactions first, ties by code
    pub top_vouchers: Vec<VoucherUsage>,
    /// Most units sold first, ties by name
    pub top_menu: Vec<MenuUsage>,
}

pub fn transaction_report(transactions: &[Transaction]) -> TransactionReport {
    let count = transactions.len();
    let total_amount: i64 = transactions.iter().map(|t| t.amount).sum();

    let average_amount = if count == 0 {
        Decimal::ZERO
    } else {
        (Decimal::from(total_amount) / Decimal::from(count as u64)).round_dp(2)
    };

    let by_branch = Branch::ALL
        .into_iter()
        .map(|branch| {
            let rows = transactions.iter().filter(|t| t.branch == branch);
            BranchSummary {
                branch,
                count: rows.clone().count(),
                amount: rows.map(|t| t.amount).sum(),
            }
        })
        .collect();

    let mut per_voucher: HashMap<&str, (usize, i64)> = HashMap::new();
    let mut per_menu: HashMap<&str, i64> = HashMap::new();
    for tx in transactions {
        let entry = per_voucher.entry(tx.voucher_code.as_str()).or_default();
        entry.0 += 1;
        entry.1 += tx.amount;
        for line in &tx.items {
            *per_menu.entry(line.name.as_str()).or_default() += i64::from(line.qty);
        }
    }

    let mut top_vouchers: Vec<VoucherUsage> = per_voucher
        .into_iter()
        .map(|(code, (count, amount))| VoucherUsage {
            code: code.to_string(),
            count,
            amount,
        })
        .collect();
    top_vouchers.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.code.cmp(&b.code)));
    top_vouchers.truncate(TOP_N);

    let mut top_menu: Vec<MenuUsage> = per_menu
        .into_iter()
        .map(|(name, qty)| MenuUsage {
            name: name.to_string(),
            qty,
        })
        .collect();
    top_menu.sort_by(|a, b| b.qty.cmp(&a.qty).then_with(|| a.name.cmp(&b.name)));
    top_menu.truncate(TOP_N);

    TransactionReport {
        count,
        total_amount,
        voucher_amount: transactions.iter().map(|t| t.voucher_amount).sum(),
        cash_amount: transactions.iter().map(|t| t.cash_amount).sum(),
        average_amount,
        by_branch,
        top_vouchers,
        top_menu,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::OrderLine;
    use std::str::FromStr;

    fn tx(code: &str, branch: Branch, items: &[(&str, i32, i64)], cash: i64) -> Transaction {
        let items: Vec<OrderLine> = items
            .iter()
            .enumerate()
            .map(|(i, (name, qty, price))| OrderLine {
                menu_item_id: i as i64,
                name: name.to_string(),
                qty: *qty,
                unit_price: *price,
            })
            .collect();
        let amount = items.iter().map(|l| l.subtotal().unwrap()).sum();
        Transaction {
            id: 0,
            voucher_code: code.into(),
            branch,
            items,
            amount,
            voucher_amount: amount - cash,
            cash_amount: cash,
            cashier_id: 1,
            created_at: 0,
        }
    }

    #[test]
    fn test_transaction_report_totals() {
        let txs = vec![
            tx("B", Branch::Sedati, &[("Mie Ayam", 2, 12_000)], 0),
            tx("A", Branch::Tawangsari, &[("Es Teh", 3, 4_000), ("Mie Ayam", 1, 13_000)], 5_000),
            tx("A", Branch::Sedati, &[("Es Teh", 1, 4_000)], 0),
        ];
        let report = transaction_report(&txs);

        assert_eq!(report.count, 3);
        assert_eq!(report.total_amount, 24_000 + 25_000 + 4_000);
        assert_eq!(report.cash_amount, 5_000);
        assert_eq!(report.voucher_amount, 48_000);
        assert_eq!(report.average_amount, Decimal::from_str("17666.67").unwrap());

        assert_eq!(
            report.by_branch,
            vec![
                BranchSummary { branch: Branch::Sedati, count: 2, amount: 28_000 },
                BranchSummary { branch: Branch::Tawangsari, count: 1, amount: 25_000 },
            ]
        );

        assert_eq!(report.top_vouchers[0].code, "A");
        assert_eq!(report.top_vouchers[0].count, 2);
        assert_eq!(report.top_vouchers[1].code, "B");

        // Es Teh 4 units, Mie Ayam 3 units
        assert_eq!(
            report.top_menu,
            vec![
                MenuUsage { name: "Es Teh".into(), qty: 4 },
                MenuUsage { name: "Mie Ayam".into(), qty: 3 },
            ]
        );
    }

    #[test]
    fn test_top_n_ties_and_truncation() {
        let txs: Vec<Transaction> = ["F", "E", "D", "C", "B", "A"]
            .iter()
            .map(|code| tx(code, Branch::Sedati, &[("Kopi", 1, 5_000)], 0))
            .collect();
        let report = transaction_report(&txs);
        let codes: Vec<&str> = report.top_vouchers.iter().map(|v| v.code.as_str()).collect();
        assert_eq!(codes, vec!["A", "B", "C", "D", "E"]);
    }

    #[test]
    fn test_empty() {
        let report = transaction_report(&[]);
        assert_eq!(report.count, 0);
        assert_eq!(report.average_amount, Decimal::ZERO);
        assert!(report.top_menu.is_empty());
        assert_eq!(report.by_branch.len(), 2);
    }
}
