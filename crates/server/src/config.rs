//! Server configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `TIFFIN_ADMIN_PASSWORD` - Password gating `POST /api/update-menu` (min 8 chars)
//!
//! ## Optional
//! - `TIFFIN_HOST` - Bind address (default: 127.0.0.1)
//! - `TIFFIN_PORT` - Listen port (default: 5000)
//! - `TIFFIN_DATA_DIR` - Directory holding the collection files (default: data)
//! - `TIFFIN_ALLOWED_ORIGINS` - Comma-separated CORS origins (default: any origin)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

use axum::http::HeaderValue;
use secrecy::{ExposeSecret, SecretString};
use thiserror::Error;

const MIN_ADMIN_PASSWORD_LENGTH: usize = 8;

/// Default data directory, relative to the working directory.
pub const DEFAULT_DATA_DIR: &str = "data";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
    #[error("Insecure secret in {0}: {1}")]
    InsecureSecret(String, String),
}

/// Server configuration, read once at startup.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Directory holding `menu.json`, `orders.json`, `reservations.json`, `customers.json`
    pub data_dir: PathBuf,
    /// Password required to replace the menu
    pub admin_password: SecretString,
    /// Origins allowed by CORS; empty means any origin
    pub allowed_origins: Vec<HeaderValue>,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment tag
    pub sentry_environment: Option<String>,
}

impl ServerConfig {
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

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable source.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or invalid.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let env = Env(lookup);

        let host = env
            .or_default("TIFFIN_HOST", "127.0.0.1")
            .parse::<IpAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar("TIFFIN_HOST".to_string(), e.to_string()))?;
        let port = env
            .or_default("TIFFIN_PORT", "5000")
            .parse::<u16>()
            .map_err(|e| ConfigError::InvalidEnvVar("TIFFIN_PORT".to_string(), e.to_string()))?;
        let data_dir = PathBuf::from(env.or_default("TIFFIN_DATA_DIR", DEFAULT_DATA_DIR));

        let admin_password = SecretString::from(env.required("TIFFIN_ADMIN_PASSWORD")?);
        validate_admin_password(&admin_password, "TIFFIN_ADMIN_PASSWORD")?;

        let allowed_origins = env
            .optional("TIFFIN_ALLOWED_ORIGINS")
            .map(|raw| parse_origins(&raw, "TIFFIN_ALLOWED_ORIGINS"))
            .transpose()?
            .unwrap_or_default();

        Ok(Self {
            host,
            port,
            data_dir,
            admin_password,
            allowed_origins,
            sentry_dsn: env.optional("SENTRY_DSN"),
            sentry_environment: env.optional("SENTRY_ENVIRONMENT"),
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

/// Variable source with the lookups config loading needs.
struct Env<F>(F);

impl<F> Env<F>
where
    F: Fn(&str) -> Option<String>,
{
    /// Get a required variable; empty values count as missing.
    fn required(&self, key: &str) -> Result<String, ConfigError> {
        self.optional(key)
            .ok_or_else(|| ConfigError::MissingEnvVar(key.to_string()))
    }

    /// Get an optional variable; empty values count as unset.
    fn optional(&self, key: &str) -> Option<String> {
        (self.0)(key).filter(|value| !value.trim().is_empty())
    }

    /// Get a variable with a default value.
    fn or_default(&self, key: &str, default: &str) -> String {
        self.optional(key).unwrap_or_else(|| default.to_string())
    }
}

/// Validate that the admin password meets minimum length requirements.
fn validate_admin_password(secret: &SecretString, var_name: &str) -> Result<(), ConfigError> {
    let len = secret.expose_secret().chars().count();
    if len < MIN_ADMIN_PASSWORD_LENGTH {
        return Err(ConfigError::InsecureSecret(
            var_name.to_string(),
            format!("must be at least {MIN_ADMIN_PASSWORD_LENGTH} characters (got {len})"),
        ));
    }
    Ok(())
}

/// Parse a comma-separated origin list into header values.
fn parse_origins(raw: &str, var_name: &str) -> Result<Vec<HeaderValue>, ConfigError> {
    raw.split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .map(|origin| {
            HeaderValue::from_str(origin).map_err(|e| {
                ConfigError::InvalidEnvVar(var_name.to_string(), format!("{origin}: {e}"))
            })
        })
        .collect()
}
