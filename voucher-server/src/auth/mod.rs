//! Session authentication, role gating and rate limiting

pub mod jwt;
pub mod middleware;
pub mod rate_limit;

pub use jwt::{CurrentUser, JwtConfig, JwtError, JwtService};
pub use middleware::{require_auth, require_role};
pub use rate_limit::{ClientIp, RateLimiter};
