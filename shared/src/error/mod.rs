//! Unified error system for the voucher service
//!
//! - [`ErrorCode`]: numeric codes shared by server and clients
//! - [`ErrorCategory`]: classification by code range
//! - [`AppError`]: error carrying a code, a message and optional details
//! - [`ApiResponse`]: the JSON envelope every endpoint answers with
//!
//! # Example
//!
//! ```
//! use shared::error::{AppError, ErrorCode, ApiResponse};
//!
//! let err = AppError::new(ErrorCode::VoucherNotFound)
//!     .with_detail("code", "ABC123");
//! let response = ApiResponse::<()>::error(&err);
//! assert_eq!(response.code, Some(3001));
//! ```

mod category;
mod codes;
mod http;
mod types;

pub use category::ErrorCategory;
pub use codes::{ErrorCode, InvalidErrorCode};
pub use types::{ApiResponse, AppError, AppResult};
