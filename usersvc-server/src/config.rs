//! Database configuration - environment loading and connect options
//!
//! Configuration is loaded from environment variables:
//! - `DB_HOST`, `DB_USER`, `DB_PASSWORD`, `DB_NAME`: required
//! - `DB_SSL_CA`: optional CA bundle, switches TLS to certificate verification
//! - `DB_MAX_CONNECTIONS`: pool size (default: 5)
//!
//! The port is always 3306 and TLS is always on.

use std::fmt;
use std::path::PathBuf;

use sqlx::mysql::{MySqlConnectOptions, MySqlSslMode};

/// MySQL port. Not configurable.
pub const MYSQL_PORT: u16 = 3306;

/// Default maximum connections for the pool.
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;

/// Configuration error
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} not set")]
    Missing(&'static str),

    #[error("invalid {var}: {reason}")]
    Invalid { var: &'static str, reason: String },
}

/// Database connection settings
#[derive(Clone)]
pub struct DbConfig {
    pub host: String,
    pub user: String,
    pub password: String,
    pub database: String,
    /// CA bundle used to verify the server certificate
    pub ssl_ca: Option<PathBuf>,
    pub max_connections: u32,
}

impl DbConfig {
    /// Create config from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Create config from an arbitrary variable lookup (for testing)
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |var: &'static str| lookup(var).ok_or(ConfigError::Missing(var));

        let max_connections = match lookup("DB_MAX_CONNECTIONS") {
            Some(raw) => parse_max_connections(&raw)?,
            None => DEFAULT_MAX_CONNECTIONS,
        };

        Ok(Self {
            host: required("DB_HOST")?,
            user: required("DB_USER")?,
            password: required("DB_PASSWORD")?,
            database: required("DB_NAME")?,
            ssl_ca: lookup("DB_SSL_CA").filter(|s| !s.is_empty()).map(PathBuf::from),
            max_connections,
        })
    }

    /// TLS mode: `Required` always, `VerifyCa` once a CA bundle is known.
    pub fn ssl_mode(&self) -> MySqlSslMode {
        if self.ssl_ca.is_some() {
            MySqlSslMode::VerifyCa
        } else {
            MySqlSslMode::Required
        }
    }

    /// Build sqlx connect options for this configuration.
    pub fn connect_options(&self) -> MySqlConnectOptions {
        let options = MySqlConnectOptions::new()
            .host(&self.host)
            .port(MYSQL_PORT)
            .username(&self.user)
            .password(&self.password)
            .database(&self.database)
            .ssl_mode(self.ssl_mode());

        match &self.ssl_ca {
            Some(ca) => options.ssl_ca(ca),
            None => options,
        }
    }
}

fn parse_max_connections(raw: &str) -> Result<u32, ConfigError> {
    let value: u32 = raw.trim().parse().map_err(|_| ConfigError::Invalid {
        var: "DB_MAX_CONNECTIONS",
        reason: format!("'{}' is not a positive integer", raw),
    })?;

    if value == 0 {
        return Err(ConfigError::Invalid {
            var: "DB_MAX_CONNECTIONS",
            reason: "must be at least 1".to_owned(),
        });
    }

    Ok(value)
}

impl fmt::Debug for DbConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DbConfig")
            .field("host", &self.host)
            .field("user", &self.user)
            .field("password", &"***")
            .field("database", &self.database)
            .field("ssl_ca", &self.ssl_ca)
            .field("max_connections", &self.max_connections)
            .finish()
    }
}
