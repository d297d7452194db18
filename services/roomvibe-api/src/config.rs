//! Configuration for the RoomVibe API service.

use std::time::Duration;

use roomvibe_core::config::process_env;
use roomvibe_core::db_guard::select_database;
use roomvibe_core::{parse_bool, DatabaseGuardConfig, DatabaseTarget, EnvironmentConfig, GuardError};
use roomvibe_db::PoolOptions;

/// API configuration
#[derive(Clone)]
pub struct Config {
    /// HTTP server port
    pub http_port: u16,
    /// Database chosen by the environment guard
    pub database: DatabaseTarget,
    /// Pool sizing and timeouts
    pub pool: PoolOptions,
    /// Session token secret
    pub jwt_secret: String,
    /// Environment classification inputs
    pub environment: EnvironmentConfig,
    /// Request timeout
    pub request_timeout: Duration,
    /// Metrics enabled
    pub metrics_enabled: bool,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("http_port", &self.http_port)
            .field("database", &self.database)
            .field("pool", &self.pool)
            .field("environment", &self.environment)
            .field("request_timeout", &self.request_timeout)
            .field("metrics_enabled", &self.metrics_enabled)
            .finish_non_exhaustive()
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(process_env)
    }

    /// Load configuration through `lookup`
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        // Database, checked against the deployment environment
        let database = select_database(&DatabaseGuardConfig::from_lookup(&lookup))?;

        let jwt_secret = lookup("JWT_SECRET").ok_or(ConfigError::Missing("JWT_SECRET"))?;

        let http_port = parse_or(&lookup, "HTTP_PORT", 3001)?;
        let request_timeout_secs: u64 = parse_or(&lookup, "REQUEST_TIMEOUT_SECS", 30)?;

        let pool = PoolOptions {
            max_connections: parse_or(&lookup, "DB_MAX_CONNECTIONS", 10)?,
            acquire_timeout: Duration::from_secs(parse_or(&lookup, "DB_ACQUIRE_TIMEOUT_SECS", 5)?),
            ..PoolOptions::default()
        };

        Ok(Self {
            http_port,
            database,
            pool,
            jwt_secret,
            environment: EnvironmentConfig::from_lookup(&lookup),
            request_timeout: Duration::from_secs(request_timeout_secs),
            metrics_enabled: parse_bool(lookup("METRICS_ENABLED").as_deref(), true),
        })
    }
}

fn parse_or<T: std::str::FromStr>(
    lookup: impl Fn(&str) -> Option<String>,
    key: &'static str,
    default: T,
) -> Result<T, ConfigError> {
    match lookup(key) {
        Some(raw) => raw.trim().parse().map_err(|_| ConfigError::Invalid(key)),
        None => Ok(default),
    }
}

/// Configuration error
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),

    #[error("Invalid value for environment variable: {0}")]
    Invalid(&'static str),

    #[error("Database guard refused to start: {0}")]
    Guard(#[from] GuardError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use roomvibe_core::config::lookup_from;
    use roomvibe_types::Environment;

    const PROD_URL: &str = "postgres://app:pw@db.production.internal/roomvibe";

    #[test]
    fn test_defaults() {
        let config = Config::from_lookup(lookup_from(&[
            ("DATABASE_URL_PRODUCTION", PROD_URL),
            ("JWT_SECRET", "s3cret"),
        ]))
        .unwrap();

        assert_eq!(config.http_port, 3001);
        assert_eq!(config.request_timeout, Duration::from_secs(30));
        assert!(config.metrics_enabled);
        assert_eq!(config.pool.max_connections, 10);
        assert_eq!(config.database.environment, Environment::Production);
        assert!(!format!("{config:?}").contains("s3cret"));
        assert!(!format!("{config:?}").contains("pw@"));
    }

    #[test]
    fn test_missing_secret() {
        let err = Config::from_lookup(lookup_from(&[("DATABASE_URL_PRODUCTION", PROD_URL)]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::Missing("JWT_SECRET")));
    }

    #[test]
    fn test_invalid_port() {
        let err = Config::from_lookup(lookup_from(&[
            ("DATABASE_URL_PRODUCTION", PROD_URL),
            ("JWT_SECRET", "s"),
            ("HTTP_PORT", "eighty"),
        ]))
        .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid("HTTP_PORT")));
    }

    #[test]
    fn test_guard_refusal_stops_startup() {
        let err = Config::from_lookup(lookup_from(&[
            ("STAGING_ENVIRONMENT", "true"),
            ("DATABASE_URL", PROD_URL),
            ("DATABASE_URL_PRODUCTION", PROD_URL),
            ("JWT_SECRET", "s"),
        ]))
        .unwrap_err();
        assert!(matches!(err, ConfigError::Guard(_)));
    }
}
