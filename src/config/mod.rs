use std::env;
use std::str::FromStr;

use chrono::{FixedOffset, Offset, Utc};
use thiserror::Error;

pub mod cors;
pub mod security;

pub use cors::create_cors_layer;
pub use security::create_security_headers_layer;

const DEFAULT_DATABASE_URL: &str = "postgres://localhost/campus_events";
const DEFAULT_PORT: u16 = 3001;
const DEFAULT_MAX_CONNECTIONS: u32 = 5;
const DEFAULT_MAX_PAGE_LIMIT: u32 = 100;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid value for {key}: '{value}'")]
    InvalidValue { key: &'static str, value: String },
}

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub port: u16,
    pub max_connections: u32,
    /// Comma-separated list, parsed by [`create_cors_layer`].
    pub cors_allowed_origins: String,
    /// Enables HSTS.
    pub production: bool,
    /// Calendar used to resolve `today`, `this-week` and `this-month`.
    pub calendar_offset: FixedOffset,
    pub max_page_limit: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_url: DEFAULT_DATABASE_URL.to_string(),
            port: DEFAULT_PORT,
            max_connections: DEFAULT_MAX_CONNECTIONS,
            cors_allowed_origins: cors::DEFAULT_ALLOWED_ORIGINS.to_string(),
            production: false,
            calendar_offset: Utc.fix(),
            max_page_limit: DEFAULT_MAX_PAGE_LIMIT,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let offset_minutes: i32 = parse(&lookup, "CALENDAR_UTC_OFFSET_MINUTES", 0)?;
        let calendar_offset = offset_minutes
            .checked_mul(60)
            .and_then(FixedOffset::east_opt)
            .ok_or_else(|| ConfigError::InvalidValue {
                key: "CALENDAR_UTC_OFFSET_MINUTES",
                value: offset_minutes.to_string(),
            })?;

        let max_page_limit = parse(&lookup, "EVENTS_MAX_PAGE_LIMIT", defaults.max_page_limit)?;
        if max_page_limit == 0 {
            return Err(ConfigError::InvalidValue {
                key: "EVENTS_MAX_PAGE_LIMIT",
                value: "0".to_string(),
            });
        }

        Ok(Self {
            database_url: lookup("DATABASE_URL").unwrap_or(defaults.database_url),
            port: parse(&lookup, "PORT", defaults.port)?,
            max_connections: parse(&lookup, "DATABASE_MAX_CONNECTIONS", defaults.max_connections)?,
            cors_allowed_origins: lookup("CORS_ALLOWED_ORIGINS")
                .unwrap_or(defaults.cors_allowed_origins),
            production: lookup("RUST_ENV")
                .map(|v| v.eq_ignore_ascii_case("production"))
                .unwrap_or(false),
            calendar_offset,
            max_page_limit,
        })
    }
}

fn parse<F, T>(lookup: &F, key: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(key) {
        None => Ok(default),
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidValue { key, value }),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config_from(vars: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults_without_environment() {
        let config = config_from(&[]).unwrap();

        assert_eq!(config.database_url, DEFAULT_DATABASE_URL);
        assert_eq!(config.port, 3001);
        assert_eq!(config.max_connections, 5);
        assert!(!config.production);
        assert_eq!(config.calendar_offset.local_minus_utc(), 0);
        assert_eq!(config.max_page_limit, 100);
    }

    #[test]
    fn test_values_are_read_from_environment() {
        let config = config_from(&[
            ("PORT", "8080"),
            ("RUST_ENV", "Production"),
            ("CALENDAR_UTC_OFFSET_MINUTES", "-300"),
            ("EVENTS_MAX_PAGE_LIMIT", "50"),
        ])
        .unwrap();

        assert_eq!(config.port, 8080);
        assert!(config.production);
        assert_eq!(config.calendar_offset.local_minus_utc(), -300 * 60);
        assert_eq!(config.max_page_limit, 50);
    }

    #[test]
    fn test_invalid_numbers_are_reported() {
        let err = config_from(&[("PORT", "eighty")]).unwrap_err();
        assert_eq!(err.to_string(), "Invalid value for PORT: 'eighty'");

        assert!(config_from(&[("CALENDAR_UTC_OFFSET_MINUTES", "100000")]).is_err());
        assert!(config_from(&[("EVENTS_MAX_PAGE_LIMIT", "0")]).is_err());
    }
}
