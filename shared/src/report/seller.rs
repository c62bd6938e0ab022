//! Seller performance over vouchers created in a period

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::models::{Voucher, VoucherStatus};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SellerCount {
    pub seller_id: i64,
    pub seller_name: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SellerReport {
    /// Distinct sellers carrying at least one voucher
    pub sellers: usize,
    /// Vouchers assigned to any seller
    pub vouchers_carried: usize,
    /// Vouchers carried per seller, descending
    pub carried: Vec<SellerCount>,
    /// Active vouchers per seller, descending; sellers with none omitted
    pub active: Vec<SellerCount>,
}

fn ranked(counts: HashMap<(i64, &str), usize>) -> Vec<SellerCount> {
    let mut ranked: Vec<SellerCount> = counts
        .into_iter()
        .map(|((seller_id, name), count)| SellerCount {
            seller_id,
            seller_name: name.to_string(),
            count,
        })
        .collect();
    ranked.sort_by(|a, b| {
        b.count
            .cmp(&a.count)
            .then_with(|| a.seller_name.cmp(&b.seller_name))
            .then_with(|| a.seller_id.cmp(&b.seller_id))
    });
    ranked
}

pub fn seller_report(vouchers: &[Voucher]) -> SellerReport {
    let mut carried: HashMap<(i64, &str), usize> = HashMap::new();
    let mut active: HashMap<(i64, &str), usize> = HashMap::new();

    for voucher in vouchers {
        let Some(seller_id) = voucher.seller_id else {
            continue;
        };
        let key = (seller_id, voucher.seller_name.as_deref().unwrap_or_default());
        *carried.entry(key).or_default() += 1;
        if voucher.status == VoucherStatus::Active {
            *active.entry(key).or_default() += 1;
        }
    }

    SellerReport {
        sellers: carried.len(),
        vouchers_carried: carried.values().sum(),
        carried: ranked(carried),
        active: ranked(active),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn voucher(seller: Option<(i64, &str)>, status: VoucherStatus) -> Voucher {
        Voucher {
            code: "X".into(),
            initial_value: 10_000,
            balance: 10_000,
            status,
            buyer_name: None,
            buyer_phone: None,
            seller_id: seller.map(|s| s.0),
            seller_name: seller.map(|s| s.1.to_string()),
            sold_on: None,
            activated_on: None,
            expires_on: None,
            cash_collected: 0,
            created_at: 0,
        }
    }

    #[test]
    fn test_seller_report() {
        let sari = Some((1, "Sari"));
        let andi = Some((2, "Andi"));
        let vouchers = vec![
            voucher(sari, VoucherStatus::Active),
            voucher(sari, VoucherStatus::Inactive),
            voucher(andi, VoucherStatus::Active),
            voucher(andi, VoucherStatus::Active),
            voucher(None, VoucherStatus::Inactive),
        ];
        let report = seller_report(&vouchers);

        assert_eq!(report.sellers, 2);
        assert_eq!(report.vouchers_carried, 4);
        // Equal carried counts: Andi before Sari by name
        assert_eq!(report.carried[0].seller_name, "Andi");
        assert_eq!(report.carried[1].seller_name, "Sari");
        assert_eq!(report.active[0].count, 2);
        assert_eq!(report.active[1].count, 1);
    }

    #[test]
    fn test_no_sellers() {
        let report = seller_report(&[voucher(None, VoucherStatus::Active)]);
        assert_eq!(report.sellers, 0);
        assert_eq!(report.vouchers_carried, 0);
        assert!(report.active.is_empty());
    }
}
