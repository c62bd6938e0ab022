//! CSV export (RFC 4180)

use chrono::{DateTime, FixedOffset, Utc};

use crate::models::{Transaction, Voucher};

/// Minimal CSV writer: CRLF line endings, fields quoted only when needed.
#[derive(Debug, Default)]
pub struct CsvWriter {
    out: String,
}

impl CsvWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record<I, S>(&mut self, fields: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for (i, field) in fields.into_iter().enumerate() {
            if i > 0 {
                self.out.push(',');
            }
            push_field(&mut self.out, field.as_ref());
        }
        self.out.push_str("\r\n");
        self
    }

    pub fn finish(self) -> String {
        self.out
    }
}

fn push_field(out: &mut String, field: &str) {
    if field.contains([',', '"', '\r', '\n']) {
        out.push('"');
        out.push_str(&field.replace('"', "\"\""));
        out.push('"');
    } else {
        out.push_str(field);
    }
}

fn opt<T: ToString>(value: &Option<T>) -> String {
    value.as_ref().map(ToString::to_string).unwrap_or_default()
}

fn timestamp(millis: i64, offset: FixedOffset) -> String {
    DateTime::<Utc>::from_timestamp_millis(millis)
        .unwrap_or_default()
        .with_timezone(&offset)
        .format("%Y-%m-%d %H:%M:%S")
        .to_string()
}

pub fn vouchers_csv(vouchers: &[Voucher]) -> String {
    let mut w = CsvWriter::new();
    w.record([
        "code",
        "initial_value",
        "balance",
        "status",
        "buyer_name",
        "buyer_phone",
        "seller",
        "sold_on",
        "activated_on",
        "expires_on",
        "cash_collected",
    ]);
    for v in vouchers {
        w.record([
            v.code.clone(),
            v.initial_value.to_string(),
            v.balance.to_string(),
            v.status.to_string(),
            opt(&v.buyer_name),
            opt(&v.buyer_phone),
            opt(&v.seller_name),
            opt(&v.sold_on),
            opt(&v.activated_on),
            opt(&v.expires_on),
            v.cash_collected.to_string(),
        ]);
    }
    w.finish()
}

/// Items are rendered as `name x qty` joined by `; `.
pub fn transactions_csv(transactions: &[Transaction], offset: FixedOffset) -> String {
    let mut w = CsvWriter::new();
    w.record([
        "id",
        "voucher_code",
        "branch",
        "items",
        "amount",
        "voucher_amount",
        "cash_amount",
        "cashier_id",
        "created_at",
    ]);
    for t in transactions {
        let items = t
            .items
            .iter()
            .map(|line| format!("{} x{}", line.name, line.qty))
            .collect::<Vec<_>>()
            .join("; ");
        w.record([
            t.id.to_string(),
            t.voucher_code.clone(),
            t.branch.to_string(),
            items,
            t.amount.to_string(),
            t.voucher_amount.to_string(),
            t.cash_amount.to_string(),
            t.cashier_id.to_string(),
            timestamp(t.created_at, offset),
        ]);
    }
    w.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Branch, OrderLine, VoucherStatus};
    use crate::util::business_offset;
    use chrono::{NaiveDate, TimeZone};

    #[test]
    fn test_quoting() {
        let mut w = CsvWriter::new();
        w.record(["plain", "with,comma", "say \"hi\"", "two\nlines"]);
        assert_eq!(
            w.finish(),
            "plain,\"with,comma\",\"say \"\"hi\"\"\",\"two\nlines\"\r\n"
        );
    }

    #[test]
    fn test_vouchers_csv() {
        let v = Voucher {
            code: "KPN-9".into(),
            initial_value: 50_000,
            balance: 12_000,
            status: VoucherStatus::Active,
            buyer_name: Some("Ani, S.Pd".into()),
            buyer_phone: None,
            seller_id: Some(1),
            seller_name: Some("Sari".into()),
            sold_on: NaiveDate::from_ymd_opt(2024, 5, 1),
            activated_on: NaiveDate::from_ymd_opt(2024, 5, 2),
            expires_on: None,
            cash_collected: 0,
            created_at: 0,
        };
        let csv = vouchers_csv(&[v]);
        let mut lines = csv.split("\r\n");
        assert!(lines.next().unwrap().starts_with("code,initial_value,balance"));
        assert_eq!(
            lines.next().unwrap(),
            "KPN-9,50000,12000,active,\"Ani, S.Pd\",,Sari,2024-05-01,2024-05-02,,0"
        );
    }

    #[test]
    fn test_transactions_csv_uses_business_time() {
        let t = Transaction {
            id: 3,
            voucher_code: "KPN-9".into(),
            branch: Branch::Tawangsari,
            items: vec![
                OrderLine { menu_item_id: 1, name: "Mie Ayam".into(), qty: 2, unit_price: 13_000 },
                OrderLine { menu_item_id: 2, name: "Es Teh".into(), qty: 1, unit_price: 4_000 },
            ],
            amount: 30_000,
            voucher_amount: 12_000,
            cash_amount: 18_000,
            cashier_id: 5,
            created_at: Utc
                .with_ymd_and_hms(2024, 5, 3, 20, 15, 0)
                .unwrap()
                .timestamp_millis(),
        };
        let csv = transactions_csv(&[t], business_offset(7));
        let row = csv.split("\r\n").nth(1).unwrap();
        assert_eq!(
            row,
            "3,KPN-9,tawangsari,Mie Ayam x2; Es Teh x1,30000,12000,18000,5,2024-05-04 03:15:00"
        );
    }
}
