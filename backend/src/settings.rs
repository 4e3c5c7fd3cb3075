//! Server configuration loaded via OrthoConfig.
//!
//! Values come from CLI flags, `CRM_*` environment variables and an optional
//! configuration file, in that order of precedence.

use std::net::SocketAddr;

use chrono::Duration;
use ortho_config::OrthoConfig;
use serde::Deserialize;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_DB_MAX_CONNECTIONS: u32 = 10;
const DEFAULT_TOKEN_TTL_HOURS: i64 = 24;

/// Failure to interpret a configured value.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SettingsError {
    /// The listen address does not parse as a socket address.
    #[error("invalid bind address {value}: {message}")]
    BindAddr {
        /// Configured text.
        value: String,
        /// Parser diagnostic.
        message: String,
    },
    /// The token lifetime is not positive or does not fit a duration.
    #[error("token lifetime must be a positive, representable number of hours, got {hours}")]
    TokenTtl {
        /// Configured hours.
        hours: i64,
    },
}

/// Process-wide settings for the API server.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "CRM")]
pub struct AppSettings {
    /// Socket address to listen on.
    pub bind_addr: Option<String>,
    /// PostgreSQL URL. Without one the server keeps data in memory.
    pub database_url: Option<String>,
    /// Upper bound on pooled database connections.
    pub db_max_connections: Option<u32>,
    /// Secret used to sign session tokens.
    pub token_secret: Option<String>,
    /// Session token lifetime in hours.
    pub token_ttl_hours: Option<i64>,
    /// Skip applying embedded migrations at startup.
    #[ortho_config(default = false)]
    pub skip_migrations: bool,
}

impl AppSettings {
    /// Resolved listen address.
    ///
    /// # Errors
    ///
    /// [`SettingsError::BindAddr`] when the configured value is not a socket
    /// address.
    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        let raw = self.bind_addr.as_deref().unwrap_or(DEFAULT_BIND_ADDR);
        raw.parse().map_err(|err: std::net::AddrParseError| SettingsError::BindAddr {
            value: raw.to_owned(),
            message: err.to_string(),
        })
    }

    /// Pool size, defaulting to ten connections.
    #[must_use]
    pub fn db_max_connections(&self) -> u32 {
        self.db_max_connections
            .unwrap_or(DEFAULT_DB_MAX_CONNECTIONS)
    }

    /// Lifetime of issued session tokens.
    ///
    /// # Errors
    ///
    /// [`SettingsError::TokenTtl`] for zero, negative or out-of-range
    /// lifetimes.
    pub fn token_ttl(&self) -> Result<Duration, SettingsError> {
        let hours = self.token_ttl_hours.unwrap_or(DEFAULT_TOKEN_TTL_HOURS);
        Duration::try_hours(hours)
            .filter(|_| hours > 0)
            .ok_or(SettingsError::TokenTtl { hours })
    }

    /// The signing secret, ignoring blank values.
    #[must_use]
    pub fn token_secret(&self) -> Option<&str> {
        self.token_secret
            .as_deref()
            .map(str::trim)
            .filter(|secret| !secret.is_empty())
    }
}
