//! Server configuration

type BoxError = Box<dyn std::error::Error + Send + Sync>;

pub const MIN_JWT_SECRET_LEN: usize = 32;

#[derive(Debug, Clone)]
pub struct Config {
    /// PostgreSQL connection URL
    pub database_url: String,
    pub http_port: u16,
    /// Environment: development | staging | production
    pub environment: String,
    /// HS256 signing secret for session tokens
    pub jwt_secret: String,
    pub jwt_expiry_hours: i64,
    /// Whole-hour UTC offset of the stall (WIB = 7)
    pub business_utc_offset_hours: i32,
    pub bootstrap_admin_username: Option<String>,
    pub bootstrap_admin_password: Option<String>,
    pub db_max_connections: u32,
    /// Allowed CORS origin; any origin when unset
    pub cors_allowed_origin: Option<String>,
}

/// Source of raw variables, so parsing can be tested without touching
/// the process environment.
trait EnvSource {
    fn get(&self, name: &str) -> Option<String>;
}

struct ProcessEnv;

impl EnvSource for ProcessEnv {
    fn get(&self, name: &str) -> Option<String> {
        std::env::var(name).ok()
    }
}

fn parse_or<T: std::str::FromStr>(
    env: &impl EnvSource,
    name: &str,
    default: T,
) -> Result<T, BoxError> {
    match env.get(name).filter(|v| !v.trim().is_empty()) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| format!("{name} has an invalid value: {raw}").into()),
        None => Ok(default),
    }
}

impl Config {
    /// Require a secret env var: must be set and non-empty in non-development environments.
    fn require_secret(
        env: &impl EnvSource,
        name: &str,
        environment: &str,
    ) -> Result<String, BoxError> {
        let val = match env.get(name) {
            Some(v) => v,
            None => {
                if environment != "development" {
                    return Err(format!("{name} must be set in {environment} environment").into());
                }
                format!("dev-{name}-not-for-production-use-only")
            }
        };
        if val.is_empty() && environment != "development" {
            return Err(format!("{name} must not be empty in {environment} environment").into());
        }
        Ok(val)
    }

    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, BoxError> {
        Self::from_source(&ProcessEnv)
    }

    fn from_source(env: &impl EnvSource) -> Result<Self, BoxError> {
        let environment = env.get("ENVIRONMENT").unwrap_or_else(|| "development".into());
        if !matches!(environment.as_str(), "development" | "staging" | "production") {
            return Err(format!("ENVIRONMENT must be development, staging or production, got {environment}").into());
        }

        let jwt_secret = Self::require_secret(env, "JWT_SECRET", &environment)?;
        if environment != "development" && jwt_secret.len() < MIN_JWT_SECRET_LEN {
            return Err(format!("JWT_SECRET must be at least {MIN_JWT_SECRET_LEN} characters").into());
        }

        let jwt_expiry_hours = parse_or(env, "JWT_EXPIRY_HOURS", 12)?;
        if jwt_expiry_hours <= 0 {
            return Err("JWT_EXPIRY_HOURS must be positive".into());
        }
        let business_utc_offset_hours = parse_or(env, "BUSINESS_UTC_OFFSET_HOURS", 7)?;
        if !(-12..=14).contains(&business_utc_offset_hours) {
            return Err("BUSINESS_UTC_OFFSET_HOURS must be between -12 and 14".into());
        }

        let non_empty = |name: &str| env.get(name).filter(|v| !v.trim().is_empty());

        Ok(Self {
            database_url: env.get("DATABASE_URL").ok_or("DATABASE_URL must be set")?,
            http_port: parse_or(env, "HTTP_PORT", 8080)?,
            environment,
            jwt_secret,
            jwt_expiry_hours,
            business_utc_offset_hours,
            bootstrap_admin_username: non_empty("BOOTSTRAP_ADMIN_USERNAME"),
            bootstrap_admin_password: non_empty("BOOTSTRAP_ADMIN_PASSWORD"),
            db_max_connections: parse_or(env, "DB_MAX_CONNECTIONS", 10)?,
            cors_allowed_origin: non_empty("CORS_ALLOWED_ORIGIN"),
        })
    }

    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }
}
