use std::env;
use thiserror::Error;

pub const DEFAULT_ACCESS_TOKEN_EXPIRY: i64 = 900;
pub const DEFAULT_REFRESH_TOKEN_EXPIRY: i64 = 604_800;
pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_RATE_LIMIT_PER_MINUTE: u32 = 60;
/// Ten years; anything longer is almost certainly a typo
pub const MAX_TOKEN_EXPIRY: i64 = 10 * 365 * 24 * 60 * 60;

/// Startup-time configuration failures. Any of these stops the process.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),
    #[error("{name} is invalid: {value:?}")]
    Invalid { name: &'static str, value: String },
    #[error("JWT_ACCESS_SECRET and JWT_REFRESH_SECRET must be different")]
    SharedSecret,
}

/// Signing secrets and token lifetimes (seconds)
#[derive(Clone)]
pub struct AuthConfig {
    pub access_secret: String,
    pub refresh_secret: String,
    pub access_token_expiry: i64,
    pub refresh_token_expiry: i64,
}

impl AuthConfig {
    pub fn new(
        access_secret: impl Into<String>,
        refresh_secret: impl Into<String>,
        access_token_expiry: i64,
        refresh_token_expiry: i64,
    ) -> Result<Self, ConfigError> {
        let access_secret = access_secret.into();
        let refresh_secret = refresh_secret.into();

        if access_secret.trim().is_empty() {
            return Err(ConfigError::Missing("JWT_ACCESS_SECRET"));
        }
        if refresh_secret.trim().is_empty() {
            return Err(ConfigError::Missing("JWT_REFRESH_SECRET"));
        }
        if access_secret == refresh_secret {
            return Err(ConfigError::SharedSecret);
        }
        if !(1..=MAX_TOKEN_EXPIRY).contains(&access_token_expiry) {
            return Err(ConfigError::Invalid {
                name: "JWT_ACCESS_TOKEN_EXPIRY",
                value: access_token_expiry.to_string(),
            });
        }
        if !(1..=MAX_TOKEN_EXPIRY).contains(&refresh_token_expiry) {
            return Err(ConfigError::Invalid {
                name: "JWT_REFRESH_TOKEN_EXPIRY",
                value: refresh_token_expiry.to_string(),
            });
        }

        Ok(Self {
            access_secret,
            refresh_secret,
            access_token_expiry,
            refresh_token_expiry,
        })
    }

    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Reads settings through `lookup` so callers can supply a source other than the process env
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let access_secret =
            lookup("JWT_ACCESS_SECRET").ok_or(ConfigError::Missing("JWT_ACCESS_SECRET"))?;
        let refresh_secret =
            lookup("JWT_REFRESH_SECRET").ok_or(ConfigError::Missing("JWT_REFRESH_SECRET"))?;
        let access_token_expiry = parse_seconds(
            &lookup,
            "JWT_ACCESS_TOKEN_EXPIRY",
            DEFAULT_ACCESS_TOKEN_EXPIRY,
        )?;
        let refresh_token_expiry = parse_seconds(
            &lookup,
            "JWT_REFRESH_TOKEN_EXPIRY",
            DEFAULT_REFRESH_TOKEN_EXPIRY,
        )?;

        Self::new(
            access_secret,
            refresh_secret,
            access_token_expiry,
            refresh_token_expiry,
        )
    }
}

fn parse_seconds<F>(lookup: &F, name: &'static str, default: i64) -> Result<i64, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(name) {
        None => Ok(default),
        Some(value) => value
            .trim()
            .parse::<i64>()
            .map_err(|_| ConfigError::Invalid { name, value }),
    }
}

/// Router-level settings
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HttpConfig {
    /// Comma-separated; empty or `*` allows any origin
    pub cors_allowed_origins: String,
    /// Per-IP budget on the auth routes
    pub rate_limit_per_minute: u32,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            cors_allowed_origins: String::new(),
            rate_limit_per_minute: DEFAULT_RATE_LIMIT_PER_MINUTE,
        }
    }
}

impl HttpConfig {
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let rate_limit_per_minute = match lookup("RATE_LIMIT_PER_MINUTE") {
            None => DEFAULT_RATE_LIMIT_PER_MINUTE,
            Some(value) => match value.trim().parse::<u32>() {
                Ok(n) if n > 0 => n,
                _ => {
                    return Err(ConfigError::Invalid {
                        name: "RATE_LIMIT_PER_MINUTE",
                        value,
                    });
                }
            },
        };

        Ok(Self {
            cors_allowed_origins: lookup("CORS_ALLOWED_ORIGINS").unwrap_or_default(),
            rate_limit_per_minute,
        })
    }
}

/// Everything `main` needs to boot
#[derive(Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub port: u16,
    pub auth: AuthConfig,
    pub http: HttpConfig,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let database_url = env::var("DATABASE_URL").map_err(|_| ConfigError::Missing("DATABASE_URL"))?;
        let port = match env::var("APP_PORT") {
            Ok(value) => value
                .parse::<u16>()
                .map_err(|_| ConfigError::Invalid {
                    name: "APP_PORT",
                    value,
                })?,
            Err(_) => DEFAULT_PORT,
        };

        Ok(Self {
            database_url,
            port,
            auth: AuthConfig::from_env()?,
            http: HttpConfig::from_lookup(|key| env::var(key).ok())?,
        })
    }
}
