//! Redemption eligibility and seller activation rules

use chrono::NaiveDate;

use crate::error::{AppError, AppResult, ErrorCode};
use crate::models::{Seller, Voucher, VoucherStatus};

pub const MAX_BUYER_NAME_LEN: usize = 100;

/// Check that a voucher can be used today.
///
/// Rules are evaluated in a fixed order and the first failure is returned:
/// missing, inactive, sold out, expired, never activated, activated today
/// or later (redemption opens the day after activation).
pub fn ensure_redeemable<'a>(
    voucher: Option<&'a Voucher>,
    code: &str,
    today: NaiveDate,
) -> AppResult<&'a Voucher> {
    let voucher = voucher.ok_or_else(|| AppError::voucher_not_found(code))?;
    let fail = |code: ErrorCode| Err(AppError::new(code).with_detail("code", voucher.code.as_str()));

    if voucher.status == VoucherStatus::Inactive {
        return fail(ErrorCode::VoucherInactive);
    }
    if voucher.status == VoucherStatus::SoldOut || voucher.balance <= 0 {
        return fail(ErrorCode::VoucherSoldOut);
    }
    if voucher.expires_on.is_some_and(|last_day| today > last_day) {
        return fail(ErrorCode::VoucherExpired);
    }
    match voucher.activated_on {
        None => fail(ErrorCode::VoucherNotActivated),
        Some(activated_on) if activated_on >= today => fail(ErrorCode::VoucherNotYetRedeemable),
        Some(_) => Ok(voucher),
    }
}

/// Check that `seller_id` may activate `voucher`.
///
/// `seller` is the record of the voucher's assigned seller, if it exists.
pub fn ensure_activatable(
    voucher: &Voucher,
    seller_id: i64,
    seller: Option<&Seller>,
) -> AppResult<()> {
    let Some(assigned) = voucher.seller_id else {
        return Err(AppError::new(ErrorCode::VoucherNotAssigned).with_detail("code", voucher.code.as_str()));
    };
    if assigned != seller_id {
        return Err(AppError::new(ErrorCode::VoucherSellerMismatch).with_detail("code", voucher.code.as_str()));
    }
    match seller {
        None => return Err(AppError::new(ErrorCode::SellerNotFound).with_detail("seller_id", seller_id)),
        Some(s) if !s.is_accepted() => {
            return Err(AppError::new(ErrorCode::SellerNotAccepted).with_detail("seller_id", seller_id));
        }
        Some(_) => {}
    }
    match voucher.status {
        VoucherStatus::Active => Err(AppError::new(ErrorCode::VoucherAlreadyActive)),
        VoucherStatus::SoldOut => Err(AppError::new(ErrorCode::VoucherSoldOut)),
        VoucherStatus::Inactive => Ok(()),
    }
}

fn required(field: &'static str, value: &str, max_len: usize) -> AppResult<String> {
    let value = value.trim();
    if value.is_empty() {
        return Err(AppError::new(ErrorCode::RequiredField).with_detail("field", field));
    }
    if value.chars().count() > max_len {
        return Err(AppError::new(ErrorCode::ValueOutOfRange).with_detail("field", field));
    }
    Ok(value.to_string())
}

/// Normalise a phone number: digits with an optional leading `+`,
/// separators (space, `-`, `.`) removed, 6 to 20 digits.
pub fn normalize_phone(raw: &str) -> AppResult<String> {
    let raw = raw.trim();
    let (plus, rest) = match raw.strip_prefix('+') {
        Some(rest) => ("+", rest),
        None => ("", raw),
    };
    let mut digits = String::with_capacity(rest.len());
    for c in rest.chars() {
        match c {
            '0'..='9' => digits.push(c),
            ' ' | '-' | '.' => {}
            _ => {
                return Err(AppError::with_message(ErrorCode::InvalidFormat, "Invalid phone number")
                    .with_detail("field", "phone"));
            }
        }
    }
    if !(6..=20).contains(&digits.len()) {
        return Err(AppError::with_message(ErrorCode::InvalidFormat, "Invalid phone number")
            .with_detail("field", "phone"));
    }
    Ok(format!("{plus}{digits}"))
}

/// Mark a voucher as sold to a buyer. Call [`ensure_activatable`] first.
pub fn activate(
    mut voucher: Voucher,
    buyer_name: &str,
    buyer_phone: &str,
    today: NaiveDate,
) -> AppResult<Voucher> {
    voucher.buyer_name = Some(required("buyer_name", buyer_name, MAX_BUYER_NAME_LEN)?);
    voucher.buyer_phone = Some(normalize_phone(buyer_phone)?);
    voucher.status = VoucherStatus::Active;
    voucher.activated_on = Some(today);
    Ok(voucher)
}
