//! Application state

use chrono::{FixedOffset, NaiveDate};
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;

use crate::auth::{JwtConfig, JwtService, RateLimiter, jwt::ISSUER};
use crate::config::Config;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// PostgreSQL connection pool
    pub pool: PgPool,
    pub jwt: JwtService,
    /// Rate limiter for login/registration routes
    pub rate_limiter: RateLimiter,
    /// Business time zone for "today" and daily grouping
    pub business_offset: FixedOffset,
}

impl AppState {
    /// Connect, run migrations and build the state
    pub async fn new(config: &Config) -> Result<Self, BoxError> {
        let pool = PgPoolOptions::new()
            .max_connections(config.db_max_connections)
            .connect(&config.database_url)
            .await?;

        sqlx::migrate!("./migrations").run(&pool).await?;
        tracing::info!("Database migrations applied");

        Ok(Self::with_pool(pool, config))
    }

    pub fn with_pool(pool: PgPool, config: &Config) -> Self {
        Self {
            pool,
            jwt: JwtService::with_config(JwtConfig {
                secret: config.jwt_secret.clone(),
                expiry_hours: config.jwt_expiry_hours,
                issuer: ISSUER.to_string(),
            }),
            rate_limiter: RateLimiter::new(),
            business_offset: shared::util::business_offset(config.business_utc_offset_hours),
        }
    }

    /// Today's date at the stall
    pub fn today(&self) -> NaiveDate {
        shared::util::business_today(self.business_offset)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// State over a pool that never connects; for tests that must not
    /// reach the database.
    pub(crate) fn lazy_state() -> AppState {
        let config = crate::config::tests::test_config();
        let pool = PgPoolOptions::new()
            .connect_lazy(&config.database_url)
            .unwrap();
        AppState::with_pool(pool, &config)
    }

    #[tokio::test]
    async fn test_business_offset_from_config() {
        let state = lazy_state();
        assert_eq!(state.business_offset.local_minus_utc(), 7 * 3600);
        assert_eq!(state.jwt.config.expiry_hours, 12);
    }
}
