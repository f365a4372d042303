//! Client configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `CREW_LOUNGE_API_URL` - Backend base URL (falls back to `NEXT_PUBLIC_API_URL`,
//!   then `http://localhost:5002/api/v1`)
//! - `CREW_LOUNGE_TIMEOUT_SECS` - Per-request timeout (default: 30)
//! - `CREW_LOUNGE_LOGOUT_TIMEOUT_SECS` - Budget for the best-effort remote logout (default: 5)
//! - `CREW_LOUNGE_TOKEN_FILE` - Where file-backed credentials live
//!   (default: `.crew-lounge/credentials.json`)

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;
use url::Url;

/// Base URL used when no environment override is present.
pub const DEFAULT_API_URL: &str = "http://localhost:5002/api/v1";
const DEFAULT_TIMEOUT_SECS: u64 = 30;
const DEFAULT_LOGOUT_TIMEOUT_SECS: u64 = 5;
const DEFAULT_TOKEN_FILE: &str = ".crew-lounge/credentials.json";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
    #[error("Invalid API base URL {0}: {1}")]
    InvalidBaseUrl(String, String),
}

/// Crew Lounge client configuration.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Backend base URL without a trailing slash, e.g. `http://localhost:5002/api/v1`
    base_url: String,
    /// Upper bound for every request
    pub request_timeout: Duration,
    /// Upper bound for the remote half of logout
    pub logout_timeout: Duration,
    /// File used by the file-backed credential store
    pub token_file: PathBuf,
}

impl ClientConfig {
    /// Configuration for `base_url` with default timeouts.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidBaseUrl` unless `base_url` is an
    /// absolute `http`/`https` URL.
    pub fn new(base_url: &str) -> Result<Self, ConfigError> {
        Ok(Self {
            base_url: normalize_base_url(base_url)?,
            request_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            logout_timeout: Duration::from_secs(DEFAULT_LOGOUT_TIMEOUT_SECS),
            token_file: PathBuf::from(DEFAULT_TOKEN_FILE),
        })
    }

    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set but invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let base_url = get_optional_env("CREW_LOUNGE_API_URL")
            .or_else(|| get_optional_env("NEXT_PUBLIC_API_URL"))
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());

        let mut config = Self::new(&base_url)?;
        config.request_timeout = get_secs("CREW_LOUNGE_TIMEOUT_SECS", DEFAULT_TIMEOUT_SECS)?;
        config.logout_timeout =
            get_secs("CREW_LOUNGE_LOGOUT_TIMEOUT_SECS", DEFAULT_LOGOUT_TIMEOUT_SECS)?;
        if let Some(path) = get_optional_env("CREW_LOUNGE_TOKEN_FILE") {
            config.token_file = PathBuf::from(path);
        }

        Ok(config)
    }

    /// Backend base URL without a trailing slash.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Builder-style timeout override.
    #[must_use]
    pub const fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_URL.to_string(),
            request_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            logout_timeout: Duration::from_secs(DEFAULT_LOGOUT_TIMEOUT_SECS),
            token_file: PathBuf::from(DEFAULT_TOKEN_FILE),
        }
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

fn normalize_base_url(raw: &str) -> Result<String, ConfigError> {
    let trimmed = raw.trim().trim_end_matches('/');
    let parsed = Url::parse(trimmed)
        .map_err(|e| ConfigError::InvalidBaseUrl(raw.to_string(), e.to_string()))?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(ConfigError::InvalidBaseUrl(
            raw.to_string(),
            format!("unsupported scheme {}", parsed.scheme()),
        ));
    }
    Ok(trimmed.to_string())
}

/// Get an optional, non-empty environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

/// Get a positive number of seconds with a default value.
fn get_secs(key: &str, default: u64) -> Result<Duration, ConfigError> {
    let Some(raw) = get_optional_env(key) else {
        return Ok(Duration::from_secs(default));
    };
    match raw.trim().parse::<u64>() {
        Ok(0) => Err(ConfigError::InvalidEnvVar(
            key.to_string(),
            "must be greater than zero".to_string(),
        )),
        Ok(secs) => Ok(Duration::from_secs(secs)),
        Err(e) => Err(ConfigError::InvalidEnvVar(key.to_string(), e.to_string())),
    }
}
