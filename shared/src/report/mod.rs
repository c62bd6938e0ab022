//! Admin reports
//!
//! Aggregation over rows already fetched (and date-filtered) by the server.

pub mod csv;
pub mod seller;
pub mod transaction;
pub mod voucher;

pub use seller::{SellerCount, SellerReport, seller_report};
pub use transaction::{BranchSummary, MenuUsage, TransactionReport, VoucherUsage, transaction_report};
pub use voucher::{DailyUsage, StatusCount, VoucherReport, voucher_report};

/// Number of entries in "top N" rankings
pub const TOP_N: usize = 5;
