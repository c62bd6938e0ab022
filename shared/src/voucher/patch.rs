//! Admin corrections to a voucher

use crate::error::{AppError, AppResult, ErrorCode};
use crate::models::{Voucher, VoucherStatus, VoucherUpdate};

use super::rules::normalize_phone;

fn clean(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Apply a partial update. Balance and initial value never change.
///
/// A voucher with no balance left must stay `sold_out`.
pub fn apply_update(mut voucher: Voucher, patch: VoucherUpdate) -> AppResult<Voucher> {
    if let Some(name) = patch.buyer_name {
        voucher.buyer_name = clean(name);
    }
    if let Some(phone) = patch.buyer_phone {
        voucher.buyer_phone = clean(phone).map(|p| normalize_phone(&p)).transpose()?;
    }
    if let Some(status) = patch.status {
        if voucher.balance == 0 && status != VoucherStatus::SoldOut {
            return Err(AppError::with_message(
                ErrorCode::VoucherSoldOut,
                "Voucher has no balance left and must stay sold out",
            )
            .with_detail("code", voucher.code.as_str()));
        }
        voucher.status = status;
    }
    if let Some(sold_on) = patch.sold_on {
        voucher.sold_on = sold_on;
    }
    if let Some(activated_on) = patch.activated_on {
        voucher.activated_on = activated_on;
    }
    if let Some(expires_on) = patch.expires_on {
        voucher.expires_on = expires_on;
    }
    Ok(voucher)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn voucher() -> Voucher {
        Voucher {
            code: "KPN-002".into(),
            initial_value: 30_000,
            balance: 30_000,
            status: VoucherStatus::Inactive,
            buyer_name: Some("Budi".into()),
            buyer_phone: None,
            seller_id: None,
            seller_name: None,
            sold_on: None,
            activated_on: None,
            expires_on: NaiveDate::from_ymd_opt(2024, 12, 31),
            cash_collected: 0,
            created_at: 0,
        }
    }

    #[test]
    fn test_absent_fields_untouched() {
        let updated = apply_update(voucher(), VoucherUpdate::default()).unwrap();
        assert_eq!(updated, voucher());
    }

    #[test]
    fn test_null_clears_and_values_set() {
        let patch: VoucherUpdate = serde_json::from_str(
            r#"{"buyer_name": null, "buyer_phone": "0812 3456 789", "expires_on": null,
                "status": "active", "activated_on": "2024-06-01"}"#,
        )
        .unwrap();
        let updated = apply_update(voucher(), patch).unwrap();
        assert_eq!(updated.buyer_name, None);
        assert_eq!(updated.buyer_phone.as_deref(), Some("08123456789"));
        assert_eq!(updated.expires_on, None);
        assert_eq!(updated.status, VoucherStatus::Active);
        assert_eq!(updated.activated_on, NaiveDate::from_ymd_opt(2024, 6, 1));
        assert_eq!(updated.balance, 30_000);
    }

    #[test]
    fn test_empty_voucher_stays_sold_out() {
        let mut v = voucher();
        v.balance = 0;
        v.status = VoucherStatus::SoldOut;
        let patch = VoucherUpdate {
            status: Some(VoucherStatus::Active),
            ..Default::default()
        };
        let err = apply_update(v, patch).unwrap_err();
        assert_eq!(err.code, ErrorCode::VoucherSoldOut);
    }
}
