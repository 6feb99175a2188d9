//! Database configuration module.

use std::{env, str::FromStr};
use thiserror::Error;

/// Configuration error types
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Missing required environment variable: {var}\nHint: {hint}")]
    MissingRequired { var: String, hint: String },

    #[error("Invalid configuration for {var}: {reason}")]
    Invalid { var: String, reason: String },
}

/// Database configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatabaseConfig {
    /// PostgreSQL connection URL
    pub database_url: String,

    /// Maximum number of connections in the pool
    pub max_connections: u32,

    /// Minimum number of connections in the pool
    pub min_connections: u32,

    /// Connection timeout in seconds
    pub connection_timeout_secs: u64,

    /// Idle connection timeout in seconds
    pub idle_timeout_secs: u64,

    /// Maximum connection lifetime in seconds
    pub max_lifetime_secs: u64,
}

impl DatabaseConfig {
    /// Create configuration from environment variables
    ///
    /// Expected environment variables:
    /// - `DATABASE_URL`: PostgreSQL connection string (required)
    /// - `DB_MAX_CONNECTIONS`: Maximum pool size (default: 10)
    /// - `DB_MIN_CONNECTIONS`: Minimum pool size (default: 1)
    /// - `DB_CONNECTION_TIMEOUT`: Connection timeout in seconds (default: 10)
    /// - `DB_IDLE_TIMEOUT`: Idle timeout in seconds (default: 600)
    /// - `DB_MAX_LIFETIME`: Max lifetime in seconds (default: 1800)
    ///
    /// # Errors
    ///
    /// `MissingRequired` if `DATABASE_URL` is unset, `Invalid` if a numeric
    /// variable does not parse or the pool bounds are inverted.
    pub fn from_env() -> Result<Self, ConfigError> {
        let database_url = env::var("DATABASE_URL").map_err(|_| ConfigError::MissingRequired {
            var: "DATABASE_URL".to_string(),
            hint: "e.g. postgres://americano@localhost/americano".to_string(),
        })?;
        Self::with_url(database_url).apply_env()
    }

    /// Defaults for pool sizing around an explicit URL.
    pub fn with_url(database_url: impl Into<String>) -> Self {
        Self {
            database_url: database_url.into(),
            ..Self::development()
        }
    }

    /// Override pool settings from the `DB_*` variables.
    pub fn apply_env(self) -> Result<Self, ConfigError> {
        let config = Self {
            max_connections: parse_env("DB_MAX_CONNECTIONS", self.max_connections)?,
            min_connections: parse_env("DB_MIN_CONNECTIONS", self.min_connections)?,
            connection_timeout_secs: parse_env(
                "DB_CONNECTION_TIMEOUT",
                self.connection_timeout_secs,
            )?,
            idle_timeout_secs: parse_env("DB_IDLE_TIMEOUT", self.idle_timeout_secs)?,
            max_lifetime_secs: parse_env("DB_MAX_LIFETIME", self.max_lifetime_secs)?,
            database_url: self.database_url,
        };
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration after loading
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.database_url.trim().is_empty() {
            return Err(ConfigError::Invalid {
                var: "DATABASE_URL".to_string(),
                reason: "Must not be empty".to_string(),
            });
        }
        if self.max_connections == 0 {
            return Err(ConfigError::Invalid {
                var: "DB_MAX_CONNECTIONS".to_string(),
                reason: "Must be greater than 0".to_string(),
            });
        }
        if self.min_connections > self.max_connections {
            return Err(ConfigError::Invalid {
                var: "DB_MIN_CONNECTIONS".to_string(),
                reason: format!(
                    "Cannot exceed max connections ({})",
                    self.max_connections
                ),
            });
        }
        Ok(())
    }

    /// Create a default configuration for development
    ///
    /// Uses `postgres://postgres@localhost/americano` as the database URL
    pub fn development() -> Self {
        Self {
            database_url: "postgres://postgres@localhost/americano".to_string(),
            max_connections: 10,
            min_connections: 1,
            connection_timeout_secs: 10,
            idle_timeout_secs: 600,
            max_lifetime_secs: 1800,
        }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self::development()
    }
}

/// Parse an environment variable, falling back to `default` when unset.
///
/// A set but malformed value is an error rather than a silent default.
pub fn parse_env<T: FromStr>(key: &str, default: T) -> Result<T, ConfigError> {
    match env::var(key) {
        Ok(raw) => raw.trim().parse().map_err(|_| ConfigError::Invalid {
            var: key.to_string(),
            reason: format!("cannot parse '{raw}'"),
        }),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_display() {
        let err = ConfigError::MissingRequired {
            var: "DATABASE_URL".to_string(),
            hint: "set it".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("DATABASE_URL"));
        assert!(msg.contains("set it"));
    }

    #[test]
    fn test_with_url_keeps_pool_defaults() {
        let config = DatabaseConfig::with_url("postgres://x@y/z");
        assert_eq!(config.database_url, "postgres://x@y/z");
        assert_eq!(config.max_connections, DatabaseConfig::development().max_connections);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validation_rejects_inverted_pool() {
        let config = DatabaseConfig {
            min_connections: 20,
            max_connections: 5,
            ..DatabaseConfig::development()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Invalid { var, .. }) if var == "DB_MIN_CONNECTIONS"
        ));
    }

    #[test]
    fn test_validation_rejects_empty_url() {
        let config = DatabaseConfig::with_url("  ");
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_parse_env_default_when_unset() {
        let value: u32 = parse_env("AMERICANO_TEST_SURELY_UNSET_VAR", 7).unwrap();
        assert_eq!(value, 7);
    }
}
