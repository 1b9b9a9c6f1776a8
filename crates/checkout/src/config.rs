//! Checkout configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `CHECKOUT_API_BASE_URL` - Base URL of the storefront backend
//!   (e.g., `https://shop.example.com`)
//!
//! ## Optional
//! - `CHECKOUT_HISTORY_PATH` - Path of the durable local order list
//!   (default: `my_orders.json`)
//! - `CHECKOUT_HTTP_TIMEOUT_SECS` - Request timeout in seconds
//!   (default: 10)

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

const DEFAULT_HISTORY_PATH: &str = "my_orders.json";
const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 10;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Checkout application configuration.
#[derive(Debug, Clone)]
pub struct CheckoutConfig {
    /// Base URL of the storefront backend serving `/api/*`.
    pub api_base_url: String,
    /// Path of the durable client-side order list.
    pub history_path: PathBuf,
    /// Timeout applied to every backend request.
    pub http_timeout: Duration,
}

impl CheckoutConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or
    /// invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let api_base_url = get_required_env("CHECKOUT_API_BASE_URL")?;
        let history_path =
            PathBuf::from(get_env_or_default("CHECKOUT_HISTORY_PATH", DEFAULT_HISTORY_PATH));
        let timeout_secs = get_env_or_default(
            "CHECKOUT_HTTP_TIMEOUT_SECS",
            &DEFAULT_HTTP_TIMEOUT_SECS.to_string(),
        )
        .parse::<u64>()
        .map_err(|e| {
            ConfigError::InvalidEnvVar("CHECKOUT_HTTP_TIMEOUT_SECS".to_string(), e.to_string())
        })?;

        Ok(Self {
            api_base_url,
            history_path,
            http_timeout: Duration::from_secs(timeout_secs),
        })
    }

    /// Build a configuration directly, for tests and embedding.
    #[must_use]
    pub fn new(api_base_url: impl Into<String>, history_path: impl Into<PathBuf>) -> Self {
        Self {
            api_base_url: api_base_url.into(),
            history_path: history_path.into(),
            http_timeout: Duration::from_secs(DEFAULT_HTTP_TIMEOUT_SECS),
        }
    }
}

/// Get a required environment variable.
fn get_required_env(key: &str) -> Result<String, ConfigError> {
    std::env::var(key).map_err(|_| ConfigError::MissingEnvVar(key.to_string()))
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}
