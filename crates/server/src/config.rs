//! Server configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! Everything is optional; the defaults give a working local setup.
//!
//! - `NEXUS_HOST` - Bind address (default: 0.0.0.0)
//! - `NEXUS_PORT` - Listen port (default: 3000)
//! - `NEXUS_DATABASE` - `SQLite` database file, created if missing
//!   (default: ecommerce.db)
//! - `NEXUS_ENV` - `development` or `production` (default: development)
//! - `NEXUS_STATIC_DIR` - Built client assets, served in production only
//!   (default: dist)

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

use thiserror::Error;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Whether the server runs against a live client dev server or serves a
/// built client itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunMode {
    /// API only; the client is served by an external dev server that
    /// proxies `/api` here. Logs as human-readable text, CORS wide open.
    Development,
    /// API plus the built client assets, with an `index.html` fallback for
    /// client-routed paths. Logs as JSON.
    Production,
}

impl RunMode {
    #[must_use]
    pub const fn is_production(self) -> bool {
        matches!(self, Self::Production)
    }
}

impl std::str::FromStr for RunMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "development" => Ok(Self::Development),
            "production" => Ok(Self::Production),
            _ => Err(format!("expected 'development' or 'production', got '{s}'")),
        }
    }
}

/// Server application configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// `SQLite` database file path
    pub database_path: PathBuf,
    /// Development or production behavior switch
    pub run_mode: RunMode,
    /// Directory of built client assets (production only)
    pub static_dir: PathBuf,
}

impl ServerConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is present but unparseable.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let host = get_env_or_default("NEXUS_HOST", "0.0.0.0")
            .parse::<IpAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar("NEXUS_HOST".to_string(), e.to_string()))?;
        let port = get_env_or_default("NEXUS_PORT", "3000")
            .parse::<u16>()
            .map_err(|e| ConfigError::InvalidEnvVar("NEXUS_PORT".to_string(), e.to_string()))?;
        let database_path = PathBuf::from(get_env_or_default("NEXUS_DATABASE", "ecommerce.db"));
        let run_mode = get_env_or_default("NEXUS_ENV", "development")
            .parse::<RunMode>()
            .map_err(|e| ConfigError::InvalidEnvVar("NEXUS_ENV".to_string(), e))?;
        let static_dir = PathBuf::from(get_env_or_default("NEXUS_STATIC_DIR", "dist"));

        Ok(Self {
            host,
            port,
            database_path,
            run_mode,
            static_dir,
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

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}
