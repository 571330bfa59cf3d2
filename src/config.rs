use std::env;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use tracing::debug;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 4000;
const DEFAULT_ALLOWED_ORIGINS: &str = "*";
const DEFAULT_MAX_CONNECTIONS: u32 = 10;
const DEFAULT_ACQUIRE_TIMEOUT_SECS: u64 = 3;

#[derive(Debug, PartialEq)]
pub enum ConfigError {
    /// A variable was set to something that cannot be used
    Invalid { key: &'static str, value: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Invalid { key, value } => {
                write!(f, "Invalid value '{value}' for environment variable '{key}'")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Which origins the CORS policy lets through
#[derive(Debug, Clone, PartialEq)]
pub enum AllowedOrigins {
    Any,
    List(Vec<String>),
}

impl AllowedOrigins {
    fn parse(raw: &str) -> Self {
        if raw.trim() == "*" {
            return AllowedOrigins::Any;
        }

        AllowedOrigins::List(
            raw.split(',')
                .map(str::trim)
                .filter(|origin| !origin.is_empty())
                .map(str::to_string)
                .collect(),
        )
    }
}

/// Server settings read from the environment
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Postgres connection string; the memory store is used without one
    pub database_url: Option<String>,
    pub host: String,
    pub port: u16,
    pub allowed_origins: AllowedOrigins,
    pub db_max_connections: u32,
    pub db_acquire_timeout: Duration,
}

impl AppConfig {
    /// Load `.env` if present, then read the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url = lookup("DATABASE_URL").filter(|url| !url.trim().is_empty());
        let host = lookup("HOST").unwrap_or_else(|| DEFAULT_HOST.to_string());
        let port = parse_or_default(&lookup, "PORT", DEFAULT_PORT)?;
        let allowed_origins = AllowedOrigins::parse(
            &lookup("CORS_ALLOWED_ORIGINS").unwrap_or_else(|| DEFAULT_ALLOWED_ORIGINS.to_string()),
        );
        let db_max_connections =
            parse_or_default(&lookup, "DB_MAX_CONNECTIONS", DEFAULT_MAX_CONNECTIONS)?;
        let acquire_secs =
            parse_or_default(&lookup, "DB_ACQUIRE_TIMEOUT_SECS", DEFAULT_ACQUIRE_TIMEOUT_SECS)?;

        if db_max_connections == 0 {
            return Err(ConfigError::Invalid {
                key: "DB_MAX_CONNECTIONS",
                value: "0".to_string(),
            });
        }

        Ok(Self {
            database_url,
            host,
            port,
            allowed_origins,
            db_max_connections,
            db_acquire_timeout: Duration::from_secs(acquire_secs),
        })
    }
}

fn parse_or_default<F, T>(lookup: &F, key: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr + fmt::Display,
{
    match lookup(key) {
        None => {
            debug!("{key} not set, using default {default}");
            Ok(default)
        }
        Some(raw) => {
            let parsed = raw.trim().parse().ok();
            parsed.ok_or(ConfigError::Invalid { key, value: raw })
        }
    }
}
