//! Server configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `CLINIC_DATABASE_URL` - `PostgreSQL` connection string
//!
//! ## Optional
//! - `CLINIC_HOST` - Bind address (default: 127.0.0.1)
//! - `CLINIC_PORT` - Listen port (default: 3000)
//! - `CLINIC_JSON_LOGS` - Set to emit JSON-formatted logs for log shippers
//! - `DATABASE_URL` - Fallback connection string when `CLINIC_DATABASE_URL`
//!   is not set (e.g. platform-provided attachments)

use std::net::{IpAddr, SocketAddr};

use secrecy::SecretString;
use thiserror::Error;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Clinic application configuration.
#[derive(Debug, Clone)]
pub struct ClinicConfig {
    /// `PostgreSQL` database connection URL (contains password)
    pub database_url: SecretString,
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Whether to emit JSON-formatted logs
    pub json_logs: bool,
}

impl ClinicConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let database_url = get_database_url("CLINIC_DATABASE_URL")?;
        let host = get_env_or_default("CLINIC_HOST", "127.0.0.1")
            .parse::<IpAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar("CLINIC_HOST".to_string(), e.to_string()))?;
        let port = get_env_or_default("CLINIC_PORT", "3000")
            .parse::<u16>()
            .map_err(|e| ConfigError::InvalidEnvVar("CLINIC_PORT".to_string(), e.to_string()))?;
        let json_logs = std::env::var("CLINIC_JSON_LOGS").is_ok();

        Ok(Self {
            database_url,
            host,
            port,
            json_logs,
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get database URL with fallback to generic `DATABASE_URL` (used by hosted
/// `PostgreSQL` attachments).
fn get_database_url(primary_key: &str) -> Result<SecretString, ConfigError> {
    // Try primary key first (e.g., CLINIC_DATABASE_URL)
    if let Ok(value) = std::env::var(primary_key) {
        return Ok(SecretString::from(value));
    }
    // Fallback to generic DATABASE_URL
    if let Ok(value) = std::env::var("DATABASE_URL") {
        return Ok(SecretString::from(value));
    }
    Err(ConfigError::MissingEnvVar(primary_key.to_string()))
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}
