//! Configuration management for the user API
//!
//! Settings are read from environment variables, with optional `.env` support.

use std::env;
use thiserror::Error;

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("Invalid port number: {0}")]
    InvalidPort(String),
}

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// PostgreSQL connection string
    pub database_url: String,

    /// Listener bind address
    pub host: String,

    /// Listener port
    pub port: u16,

    /// Maximum database connections
    pub db_max_connections: u32,

    /// CORS allowed origins, comma separated
    pub cors_allowed_origins: Option<String>,

    /// Log level (RUST_LOG)
    pub log_level: String,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors)
        dotenvy::dotenv().ok();

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup.
    ///
    /// `from_env` delegates here; tests pass a map instead of mutating the
    /// process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url = lookup("DATABASE_URL")
            .or_else(|| lookup("POSTGRES_CONNECTION_STRING"))
            .filter(|url| !url.trim().is_empty())
            .ok_or_else(|| ConfigError::MissingEnvVar("DATABASE_URL".to_string()))?;

        let host = lookup("HOST").unwrap_or_else(|| "0.0.0.0".to_string());

        let port = lookup("PORT")
            .unwrap_or_else(|| "8080".to_string())
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidPort("PORT must be a valid number".to_string()))?;

        let db_max_connections = lookup("DB_MAX_CONNECTIONS")
            .and_then(|v| v.parse::<u32>().ok())
            .filter(|n| *n > 0)
            .unwrap_or(5);

        let cors_allowed_origins = lookup("CORS_ALLOWED_ORIGINS");

        let log_level = lookup("RUST_LOG").unwrap_or_else(|| "info".to_string());

        Ok(Config {
            database_url,
            host,
            port,
            db_max_connections,
            cors_allowed_origins,
            log_level,
        })
    }

    /// `host:port` string for the listener
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Get database URL (useful for logging masked version)
    pub fn database_url_masked(&self) -> String {
        let url = &self.database_url;
        let authority_start = url.find("://").map_or(0, |pos| pos + 3);
        let rest = &url[authority_start..];
        let authority = &rest[..rest.find(['/', '?', '#']).unwrap_or(rest.len())];

        // userinfo ends at the last '@'; the password starts after its first ':'
        if let Some(at_pos) = authority.rfind('@') {
            if let Some(colon_pos) = authority[..at_pos].find(':') {
                let prefix = &url[..authority_start + colon_pos + 1];
                let suffix = &url[authority_start + at_pos..];
                return format!("{}****{}", prefix, suffix);
            }
        }
        url.clone()
    }
}
