//! Configuration management.
//!
//! This module handles:
//! - Environment variable loading (with `.env` support)
//! - Secrets file fallback for the API key
//! - Configuration validation
//! - Secure API key storage via [`SecretString`]
//!
//! Configuration is read once at startup. A missing or malformed credential
//! is fatal: the binary exits before any prompt is submitted.
//!
//! # Example
//!
//! ```
//! use promptlab::config::{Config, SecretString, DEFAULT_BASE_URL, DEFAULT_MODEL};
//!
//! let config = Config {
//!     api_key: SecretString::new("AIza-example-key"),
//!     model: DEFAULT_MODEL.to_string(),
//!     base_url: DEFAULT_BASE_URL.to_string(),
//!     log_level: "info".to_string(),
//!     request_timeout_ms: 30000,
//! };
//!
//! let debug = format!("{:?}", config);
//! assert!(debug.contains("<REDACTED>"));
//! assert!(!debug.contains("AIza-example-key"));
//! ```

mod secret;
mod secrets_file;
mod validation;

use std::path::PathBuf;

pub use secret::{SecretString, GOOGLE_KEY_PREFIX};
pub use secrets_file::read_secret;
pub use validation::{validate_config, MAX_TIMEOUT_MS, MIN_TIMEOUT_MS};

use crate::error::ConfigError;

/// Environment variable and secrets-file key holding the credential.
pub const API_KEY_VAR: &str = "GEMINI_API_KEY";

/// Environment variable overriding the secrets file location.
pub const SECRETS_FILE_VAR: &str = "PROMPTLAB_SECRETS_FILE";

/// Default secrets file location, relative to the working directory.
pub const DEFAULT_SECRETS_FILE: &str = ".promptlab/secrets.toml";

/// Default Gemini model.
pub const DEFAULT_MODEL: &str = "gemini-2.0-flash";

/// Default Gemini API base URL.
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Default log level.
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Default request timeout in milliseconds.
pub const DEFAULT_REQUEST_TIMEOUT_MS: u64 = 30_000;

/// Process-wide configuration.
///
/// Built once by [`Config::from_env`] and passed by reference to the
/// completion client. The `api_key` field is never printed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Gemini API key (protected from logging via [`SecretString`]).
    pub api_key: SecretString,
    /// Gemini model identifier.
    pub model: String,
    /// Base URL of the Gemini REST API.
    pub base_url: String,
    /// Log level (error, warn, info, debug, trace).
    pub log_level: String,
    /// Request timeout in milliseconds.
    pub request_timeout_ms: u64,
}

/// Where the credential was found.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeySource {
    /// The `GEMINI_API_KEY` environment variable (or `.env`).
    Environment,
    /// The TOML secrets file.
    SecretsFile,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Required (environment or secrets file):
    /// - `GEMINI_API_KEY`: Gemini API key
    ///
    /// Optional environment variables (with defaults):
    /// - `PROMPTLAB_SECRETS_FILE`: TOML secrets file (default: `.promptlab/secrets.toml`)
    /// - `GEMINI_MODEL`: Model to use (default: `gemini-2.0-flash`)
    /// - `GEMINI_BASE_URL`: API base URL
    /// - `LOG_LEVEL`: Logging level (default: `info`)
    /// - `REQUEST_TIMEOUT_MS`: Request timeout (default: `30000`)
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if:
    /// - `GEMINI_API_KEY` is found nowhere
    /// - the secrets file exists but is unreadable
    /// - `REQUEST_TIMEOUT_MS` is not a valid positive integer
    /// - Any value fails validation (see [`validate_config`])
    pub fn from_env() -> Result<Self, ConfigError> {
        load_dotenv();

        let (api_key, source) = resolve_api_key()?;
        tracing::debug!(source = ?source, "API key resolved");

        let model = std::env::var("GEMINI_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.into());
        let base_url =
            std::env::var("GEMINI_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.into());
        let log_level = log_level();
        let request_timeout_ms = parse_env_u64("REQUEST_TIMEOUT_MS", DEFAULT_REQUEST_TIMEOUT_MS)?;

        let config = Self {
            api_key,
            model,
            base_url: base_url.trim_end_matches('/').to_string(),
            log_level,
            request_timeout_ms,
        };

        validate_config(&config)?;
        Ok(config)
    }
}

/// Load `.env` from the working directory if present.
///
/// Variables already set in the process environment win.
pub fn load_dotenv() {
    let _ = dotenvy::dotenv();
}

/// Log filter directive from `LOG_LEVEL`, or [`DEFAULT_LOG_LEVEL`].
///
/// Call [`load_dotenv`] first so a level set in `.env` is seen.
#[must_use]
pub fn log_level() -> String {
    std::env::var("LOG_LEVEL").unwrap_or_else(|_| DEFAULT_LOG_LEVEL.into())
}

/// Path of the secrets file, honoring `PROMPTLAB_SECRETS_FILE`.
#[must_use]
pub fn secrets_file_path() -> PathBuf {
    std::env::var(SECRETS_FILE_VAR)
        .map_or_else(|_| PathBuf::from(DEFAULT_SECRETS_FILE), PathBuf::from)
}

/// Find the API key: environment first, then the secrets file.
///
/// # Errors
///
/// Returns [`ConfigError::MissingRequired`] if neither source defines the
/// key, or the secrets file error if that file is unreadable.
pub fn resolve_api_key() -> Result<(SecretString, KeySource), ConfigError> {
    if let Ok(value) = std::env::var(API_KEY_VAR) {
        return Ok((SecretString::new(value), KeySource::Environment));
    }

    read_secret(&secrets_file_path(), API_KEY_VAR)?
        .map(|secret| (secret, KeySource::SecretsFile))
        .ok_or_else(|| ConfigError::MissingRequired {
            var: API_KEY_VAR.into(),
        })
}

/// Parse an environment variable as u64, using a default if not set.
fn parse_env_u64(name: &str, default: u64) -> Result<u64, ConfigError> {
    std::env::var(name).map_or(Ok(default), |val| {
        val.parse().map_err(|_| ConfigError::InvalidValue {
            var: name.into(),
            reason: "must be a positive integer".into(),
        })
    })
}
