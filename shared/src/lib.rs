//! Shared types for the voucher service
//!
//! Domain models, the error-code system, voucher rules and report
//! aggregation used by `voucher-server`.

pub mod error;
pub mod models;
pub mod report;
pub mod util;
pub mod voucher;

// Re-exports
pub use axum::Json;
pub use http;
pub use serde::{Deserialize, Serialize};
