//! Voucher business rules
//!
//! Pure functions over models; the server wraps them in database
//! transactions with the voucher row locked.

pub mod code;
pub mod order;
pub mod patch;
pub mod rules;
pub mod settlement;

pub use code::{generate_code, normalize_code, normalize_prefix};
pub use order::{PricedOrder, merge_lines, price_lines};
pub use patch::apply_update;
pub use rules::{activate, ensure_activatable, ensure_redeemable};
pub use settlement::{Settlement, settle};
