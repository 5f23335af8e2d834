//! Configuration validation.
//!
//! Range and format checks for configuration values. A config that fails
//! here never reaches the completion client.

use super::Config;
use crate::error::ConfigError;

/// Minimum allowed timeout in milliseconds (1 second).
pub const MIN_TIMEOUT_MS: u64 = 1000;

/// Maximum allowed timeout in milliseconds (5 minutes).
pub const MAX_TIMEOUT_MS: u64 = 300_000;

/// Validate configuration values.
///
/// # Errors
///
/// Returns [`ConfigError::InvalidValue`] if:
/// - `GEMINI_API_KEY` is empty or contains whitespace
/// - `GEMINI_MODEL` is empty
/// - `GEMINI_BASE_URL` is not an http(s) URL
/// - `REQUEST_TIMEOUT_MS` is not between 1000 and 300000
#[must_use = "validation result should be checked"]
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    if config.api_key.is_empty() {
        return Err(ConfigError::InvalidValue {
            var: "GEMINI_API_KEY".into(),
            reason: "must not be empty".into(),
        });
    }

    if config.api_key.contains_whitespace() {
        return Err(ConfigError::InvalidValue {
            var: "GEMINI_API_KEY".into(),
            reason: "must not contain whitespace".into(),
        });
    }

    if config.model.trim().is_empty() {
        return Err(ConfigError::InvalidValue {
            var: "GEMINI_MODEL".into(),
            reason: "must not be empty".into(),
        });
    }

    match url::Url::parse(&config.base_url) {
        Ok(parsed) if matches!(parsed.scheme(), "http" | "https") => {}
        Ok(parsed) => {
            return Err(ConfigError::InvalidValue {
                var: "GEMINI_BASE_URL".into(),
                reason: format!("unsupported scheme '{}'", parsed.scheme()),
            });
        }
        Err(e) => {
            return Err(ConfigError::InvalidValue {
                var: "GEMINI_BASE_URL".into(),
                reason: e.to_string(),
            });
        }
    }

    if config.request_timeout_ms < MIN_TIMEOUT_MS || config.request_timeout_ms > MAX_TIMEOUT_MS {
        return Err(ConfigError::InvalidValue {
            var: "REQUEST_TIMEOUT_MS".into(),
            reason: format!("must be between {MIN_TIMEOUT_MS} and {MAX_TIMEOUT_MS} ms"),
        });
    }

    Ok(())
}
