//! Unified error codes for the voucher service
//!
//! Error codes are organized by category:
//! - 0xxx: General errors
//! - 1xxx: Authentication errors
//! - 2xxx: Permission errors
//! - 3xxx: Voucher errors
//! - 4xxx: Redemption errors
//! - 5xxx: Seller errors
//! - 6xxx: Menu errors
//! - 7xxx: Report errors
//! - 8xxx: User errors
//! - 9xxx: System errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// All error codes are represented as u16 values so clients can switch on
/// them without parsing messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Operation completed successfully
    Success = 0,
    /// Unknown error
    Unknown = 1,
    /// Validation failed
    ValidationFailed = 2,
    /// Resource not found
    NotFound = 3,
    /// Resource already exists
    AlreadyExists = 4,
    /// Invalid request
    InvalidRequest = 5,
    /// Invalid format
    InvalidFormat = 6,
    /// Required field missing
    RequiredField = 7,
    /// Value out of range
    ValueOutOfRange = 8,

    // ==================== 1xxx: Auth ====================
    /// User is not authenticated
    NotAuthenticated = 1001,
    /// Invalid credentials (username/password)
    InvalidCredentials = 1002,
    /// Token has expired
    TokenExpired = 1003,
    /// Token is invalid
    TokenInvalid = 1004,
    /// Account is disabled
    AccountDisabled = 1007,
    /// Too many requests from one client
    TooManyRequests = 1008,

    // ==================== 2xxx: Permission ====================
    /// Permission denied
    PermissionDenied = 2001,
    /// Specific role required
    RoleRequired = 2002,
    /// Admin role required
    AdminRequired = 2003,
    /// Seller operation attempted by an account without a seller profile
    SellerAccountRequired = 2004,

    // ==================== 3xxx: Voucher ====================
    /// Voucher not found
    VoucherNotFound = 3001,
    /// Voucher code already exists
    VoucherCodeExists = 3002,
    /// Voucher is not active
    VoucherInactive = 3003,
    /// Voucher balance is used up
    VoucherSoldOut = 3004,
    /// Voucher validity window has ended
    VoucherExpired = 3005,
    /// Voucher was activated today and can be redeemed from tomorrow
    VoucherNotYetRedeemable = 3006,
    /// Voucher has no activation date
    VoucherNotActivated = 3007,
    /// Voucher is already active
    VoucherAlreadyActive = 3008,
    /// Voucher is not assigned to any seller
    VoucherNotAssigned = 3009,
    /// Voucher is assigned to another seller
    VoucherSellerMismatch = 3010,
    /// Voucher has ledger entries
    VoucherHasTransactions = 3011,
    /// Voucher is already assigned to a seller
    VoucherAlreadyAssigned = 3012,
    /// Voucher value must be positive
    InvalidVoucherAmount = 3013,
    /// Voucher code has an invalid format
    InvalidVoucherCode = 3014,

    // ==================== 4xxx: Redemption ====================
    /// Transaction not found
    TransactionNotFound = 4001,
    /// Order has no items
    OrderEmpty = 4002,
    /// Item quantity out of range
    InvalidQuantity = 4003,
    /// Menu item has no price at the branch
    MenuItemUnavailable = 4004,
    /// Unknown branch
    InvalidBranch = 4005,

    // ==================== 5xxx: Seller ====================
    /// Seller not found
    SellerNotFound = 5001,
    /// Seller has not been accepted yet
    SellerNotAccepted = 5002,
    /// Seller is already accepted
    SellerAlreadyAccepted = 5003,
    /// Seller with the same name and phone already registered
    SellerAlreadyRegistered = 5004,
    /// Seller still carries vouchers
    SellerHasVouchers = 5005,

    // ==================== 6xxx: Menu ====================
    /// Menu item not found
    MenuItemNotFound = 6001,
    /// Menu item name already exists
    MenuItemNameExists = 6002,
    /// Price outside 1..=MAX_PRICE
    InvalidPrice = 6003,

    // ==================== 7xxx: Report ====================
    /// Date range start is after its end
    InvalidDateRange = 7001,

    // ==================== 8xxx: User ====================
    /// User not found
    UserNotFound = 8001,
    /// Username already exists
    UsernameExists = 8002,
    /// Cannot delete own account
    CannotDeleteSelf = 8003,
    /// Password too short
    PasswordTooShort = 8004,

    // ==================== 9xxx: System ====================
    /// Internal server error
    InternalError = 9001,
    /// Database error
    DatabaseError = 9002,
    /// Configuration error
    ConfigError = 9005,
}

impl ErrorCode {
    /// Get the numeric code value
    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    /// Check if this is a success code
    #[inline]
    pub const fn is_success(&self) -> bool {
        matches!(self, ErrorCode::Success)
    }

    /// Get the default English message for this error code
    pub const fn message(&self) -> &'static str {
        match self {
            // General
            ErrorCode::Success => "Operation completed successfully",
            ErrorCode::Unknown => "An unknown error occurred",
            ErrorCode::ValidationFailed => "Validation failed",
            ErrorCode::NotFound => "Resource not found",
            ErrorCode::AlreadyExists => "Resource already exists",
            ErrorCode::InvalidRequest => "Invalid request",
            ErrorCode::InvalidFormat => "Invalid format",
            ErrorCode::RequiredField => "Required field is missing",
            ErrorCode::ValueOutOfRange => "Value is out of range",

            // Auth
            ErrorCode::NotAuthenticated => "User is not authenticated",
            ErrorCode::InvalidCredentials => "Invalid username or password",
            ErrorCode::TokenExpired => "Authentication token has expired",
            ErrorCode::TokenInvalid => "Authentication token is invalid",
            ErrorCode::AccountDisabled => "Account is disabled",
            ErrorCode::TooManyRequests => "Too many requests, try again later",

            // Permission
            ErrorCode::PermissionDenied => "Permission denied",
            ErrorCode::RoleRequired => "Specific role is required",
            ErrorCode::AdminRequired => "Administrator role is required",
            ErrorCode::SellerAccountRequired => "Account is not linked to a seller",

            // Voucher
            ErrorCode::VoucherNotFound => "Voucher not found",
            ErrorCode::VoucherCodeExists => "Voucher code already exists",
            ErrorCode::VoucherInactive => "Voucher is not active yet",
            ErrorCode::VoucherSoldOut => "Voucher balance is used up",
            ErrorCode::VoucherExpired => "Voucher has expired",
            ErrorCode::VoucherNotYetRedeemable => {
                "Voucher can be redeemed from the day after activation"
            }
            ErrorCode::VoucherNotActivated => "Voucher has no activation date",
            ErrorCode::VoucherAlreadyActive => "Voucher is already active",
            ErrorCode::VoucherNotAssigned => "Voucher is not assigned to a seller",
            ErrorCode::VoucherSellerMismatch => "Voucher is assigned to another seller",
            ErrorCode::VoucherHasTransactions => "Voucher has transactions and cannot be deleted",
            ErrorCode::VoucherAlreadyAssigned => "Voucher is already assigned to a seller",
            ErrorCode::InvalidVoucherAmount => "Voucher value must be positive",
            ErrorCode::InvalidVoucherCode => "Voucher code has an invalid format",

            // Redemption
            ErrorCode::TransactionNotFound => "Transaction not found",
            ErrorCode::OrderEmpty => "Order has no items",
            ErrorCode::InvalidQuantity => "Item quantity is out of range",
            ErrorCode::MenuItemUnavailable => "Menu item is not sold at this branch",
            ErrorCode::InvalidBranch => "Unknown branch",

            // Seller
            ErrorCode::SellerNotFound => "Seller not found",
            ErrorCode::SellerNotAccepted => "Seller has not been accepted",
            ErrorCode::SellerAlreadyAccepted => "Seller is already accepted",
            ErrorCode::SellerAlreadyRegistered => "Seller is already registered",
            ErrorCode::SellerHasVouchers => "Seller still carries vouchers",

            // Menu
            ErrorCode::MenuItemNotFound => "Menu item not found",
            ErrorCode::MenuItemNameExists => "Menu item name already exists",
            ErrorCode::InvalidPrice => "Price must be between 1 and 100,000,000",

            // Report
            ErrorCode::InvalidDateRange => "Start date is after end date",

            // User
            ErrorCode::UserNotFound => "User not found",
            ErrorCode::UsernameExists => "Username already exists",
            ErrorCode::CannotDeleteSelf => "Cannot delete own account",
            ErrorCode::PasswordTooShort => "Password must be at least 8 characters",

            // System
            ErrorCode::InternalError => "Internal server error",
            ErrorCode::DatabaseError => "Database error",
            ErrorCode::ConfigError => "Configuration error",
        }
    }
}

impl From<ErrorCode> for u16 {
    #[inline]
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

/// Error returned when converting an unknown u16 into an [`ErrorCode`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidErrorCode(pub u16);

impl fmt::Display for InvalidErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid error code: {}", self.0)
    }
}

impl std::error::Error for InvalidErrorCode {}

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            // General
            0 => Ok(ErrorCode::Success),
            1 => Ok(ErrorCode::Unknown),
            2 => Ok(ErrorCode::ValidationFailed),
            3 => Ok(ErrorCode::NotFound),
            4 => Ok(ErrorCode::AlreadyExists),
            5 => Ok(ErrorCode::InvalidRequest),
            6 => Ok(ErrorCode::InvalidFormat),
            7 => Ok(ErrorCode::RequiredField),
            8 => Ok(ErrorCode::ValueOutOfRange),

            // Auth
            1001 => Ok(ErrorCode::NotAuthenticated),
            1002 => Ok(ErrorCode::InvalidCredentials),
            1003 => Ok(ErrorCode::TokenExpired),
            1004 => Ok(ErrorCode::TokenInvalid),
            1007 => Ok(ErrorCode::AccountDisabled),
            1008 => Ok(ErrorCode::TooManyRequests),

            // Permission
            2001 => Ok(ErrorCode::PermissionDenied),
            2002 => Ok(ErrorCode::RoleRequired),
            2003 => Ok(ErrorCode::AdminRequired),
            2004 => Ok(ErrorCode::SellerAccountRequired),

            // Voucher
            3001 => Ok(ErrorCode::VoucherNotFound),
            3002 => Ok(ErrorCode::VoucherCodeExists),
            3003 => Ok(ErrorCode::VoucherInactive),
            3004 => Ok(ErrorCode::VoucherSoldOut),
            3005 => Ok(ErrorCode::VoucherExpired),
            3006 => Ok(ErrorCode::VoucherNotYetRedeemable),
            3007 => Ok(ErrorCode::VoucherNotActivated),
            3008 => Ok(ErrorCode::VoucherAlreadyActive),
            3009 => Ok(ErrorCode::VoucherNotAssigned),
            3010 => Ok(ErrorCode::VoucherSellerMismatch),
            3011 => Ok(ErrorCode::VoucherHasTransactions),
            3012 => Ok(ErrorCode::VoucherAlreadyAssigned),
            3013 => Ok(ErrorCode::InvalidVoucherAmount),
            3014 => Ok(ErrorCode::InvalidVoucherCode),

            // Redemption
            4001 => Ok(ErrorCode::TransactionNotFound),
            4002 => Ok(ErrorCode::OrderEmpty),
            4003 => Ok(ErrorCode::InvalidQuantity),
            4004 => Ok(ErrorCode::MenuItemUnavailable),
            4005 => Ok(ErrorCode::InvalidBranch),

            // Seller
            5001 => Ok(ErrorCode::SellerNotFound),
            5002 => Ok(ErrorCode::SellerNotAccepted),
            5003 => Ok(ErrorCode::SellerAlreadyAccepted),
            5004 => Ok(ErrorCode::SellerAlreadyRegistered),
            5005 => Ok(ErrorCode::SellerHasVouchers),

            // Menu
            6001 => Ok(ErrorCode::MenuItemNotFound),
            6002 => Ok(ErrorCode::MenuItemNameExists),
            6003 => Ok(ErrorCode::InvalidPrice),

            // Report
            7001 => Ok(ErrorCode::InvalidDateRange),

            // User
            8001 => Ok(ErrorCode::UserNotFound),
            8002 => Ok(ErrorCode::UsernameExists),
            8003 => Ok(ErrorCode::CannotDeleteSelf),
            8004 => Ok(ErrorCode::PasswordTooShort),

            // System
            9001 => Ok(ErrorCode::InternalError),
            9002 => Ok(ErrorCode::DatabaseError),
            9005 => Ok(ErrorCode::ConfigError),

            _ => Err(InvalidErrorCode(value)),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}
