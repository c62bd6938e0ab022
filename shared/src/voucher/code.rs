//! Voucher code normalisation and generation

use rand::Rng;

use crate::error::{AppError, AppResult, ErrorCode};

/// Alphabet for generated codes, without look-alikes (0/O, 1/I)
pub const CODE_ALPHABET: &[u8] = b"ABCDEFGHJKLMNPQRSTUVWXYZ23456789";
pub const GENERATED_LEN: usize = 8;
pub const MIN_CODE_LEN: usize = 3;
pub const MAX_CODE_LEN: usize = 32;
pub const MAX_PREFIX_LEN: usize = 12;

/// Trim and upper-case a code, then check `[A-Z0-9-]{3,32}`.
pub fn normalize_code(raw: &str) -> AppResult<String> {
    let code = raw.trim().to_ascii_uppercase();
    let valid_chars = code
        .bytes()
        .all(|b| b.is_ascii_uppercase() || b.is_ascii_digit() || b == b'-');

    if !valid_chars || !(MIN_CODE_LEN..=MAX_CODE_LEN).contains(&code.len()) {
        return Err(AppError::new(ErrorCode::InvalidVoucherCode).with_detail("code", raw));
    }
    Ok(code)
}

/// Normalise an optional batch prefix: blank → `None`, else `[A-Z0-9]{1,12}`.
pub fn normalize_prefix(raw: Option<&str>) -> AppResult<Option<String>> {
    let Some(prefix) = raw.map(str::trim).filter(|p| !p.is_empty()) else {
        return Ok(None);
    };
    let prefix = prefix.to_ascii_uppercase();
    if prefix.len() > MAX_PREFIX_LEN || !prefix.bytes().all(|b| b.is_ascii_alphanumeric()) {
        return Err(AppError::with_message(
            ErrorCode::InvalidVoucherCode,
            "Prefix must be 1-12 letters or digits",
        )
        .with_detail("prefix", prefix));
    }
    Ok(Some(prefix))
}

/// Random code, `PREFIX-XXXXXXXX` when a prefix is given.
pub fn generate_code<R: Rng + ?Sized>(rng: &mut R, prefix: Option<&str>) -> String {
    let body: String = (0..GENERATED_LEN)
        .map(|_| CODE_ALPHABET[rng.gen_range(0..CODE_ALPHABET.len())] as char)
        .collect();
    match prefix {
        Some(prefix) => format!("{prefix}-{body}"),
        None => body,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_code() {
        assert_eq!(normalize_code("  kpn-001 ").unwrap(), "KPN-001");
        assert_eq!(normalize_code("ab1").unwrap(), "AB1");
    }

    #[test]
    fn test_normalize_code_rejects() {
        let too_long = "A".repeat(33);
        for raw in ["", "ab", "KPN 001", "KPN_001", "ÄBC", too_long.as_str()] {
            let err = normalize_code(raw).unwrap_err();
            assert_eq!(err.code, ErrorCode::InvalidVoucherCode, "{raw:?}");
        }
    }

    #[test]
    fn test_normalize_prefix() {
        assert_eq!(normalize_prefix(None).unwrap(), None);
        assert_eq!(normalize_prefix(Some("   ")).unwrap(), None);
        assert_eq!(normalize_prefix(Some("ramadan")).unwrap().as_deref(), Some("RAMADAN"));
        assert!(normalize_prefix(Some("RA-MA")).is_err());
        assert!(normalize_prefix(Some("ABCDEFGHIJKLM")).is_err());
    }

    #[test]
    fn test_generated_codes_are_valid() {
        let mut rng = rand::thread_rng();
        for _ in 0..100 {
            let code = generate_code(&mut rng, None);
            assert_eq!(code.len(), GENERATED_LEN);
            assert!(code.bytes().all(|b| CODE_ALPHABET.contains(&b)));
            assert_eq!(normalize_code(&code).unwrap(), code);
        }

        let code = generate_code(&mut rng, Some("RMD"));
        assert!(code.starts_with("RMD-"));
        assert_eq!(code.len(), 4 + GENERATED_LEN);
        assert_eq!(normalize_code(&code).unwrap(), code);
    }
}
