//! Error category classification

use super::codes::ErrorCode;
use serde::{Deserialize, Serialize};

/// Error category, derived from the thousands digit of the code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    /// General errors (0xxx)
    General,
    /// Authentication errors (1xxx)
    Auth,
    /// Permission errors (2xxx)
    Permission,
    /// Voucher registry errors (3xxx)
    Voucher,
    /// Redemption / ledger errors (4xxx)
    Redemption,
    /// Seller errors (5xxx)
    Seller,
    /// Menu errors (6xxx)
    Menu,
    /// Report errors (7xxx)
    Report,
    /// User account errors (8xxx)
    User,
    /// System errors (9xxx)
    System,
}

impl ErrorCategory {
    /// Determine category from error code value
    pub fn from_code(code: u16) -> Self {
        match code {
            0..1000 => Self::General,
            1000..2000 => Self::Auth,
            2000..3000 => Self::Permission,
            3000..4000 => Self::Voucher,
            4000..5000 => Self::Redemption,
            5000..6000 => Self::Seller,
            6000..7000 => Self::Menu,
            7000..8000 => Self::Report,
            8000..9000 => Self::User,
            _ => Self::System,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::General => "general",
            Self::Auth => "auth",
            Self::Permission => "permission",
            Self::Voucher => "voucher",
            Self::Redemption => "redemption",
            Self::Seller => "seller",
            Self::Menu => "menu",
            Self::Report => "report",
            Self::User => "user",
            Self::System => "system",
        }
    }
}

impl ErrorCode {
    /// Get the category for this error code
    pub fn category(&self) -> ErrorCategory {
        ErrorCategory::from_code(self.code())
    }
}
