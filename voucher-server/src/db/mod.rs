//! PostgreSQL access
//!
//! Plain query functions over `sqlx`. Functions that may run inside a
//! service transaction take `impl PgExecutor` so callers can pass either
//! the pool or `&mut *tx`.

pub mod audit;
pub mod menu;
pub mod sellers;
pub mod transactions;
pub mod users;
pub mod vouchers;
