//! Secrets file lookup.
//!
//! The credential may live in a TOML file instead of the environment:
//!
//! ```toml
//! GEMINI_API_KEY = "AIza..."
//! ```

use std::path::Path;

use super::SecretString;
use crate::error::ConfigError;

/// Read `key` from the TOML secrets file at `path`.
///
/// Returns `Ok(None)` when the file does not exist or does not define `key`.
///
/// # Errors
///
/// Returns [`ConfigError::SecretsFile`] if the file exists but cannot be read
/// or parsed, and [`ConfigError::InvalidValue`] if `key` is not a string.
pub fn read_secret(path: &Path, key: &str) -> Result<Option<SecretString>, ConfigError> {
    if !path.exists() {
        return Ok(None);
    }

    let raw = std::fs::read_to_string(path).map_err(|e| ConfigError::SecretsFile {
        path: path.display().to_string(),
        reason: e.to_string(),
    })?;

    let table: toml::Table = raw.parse().map_err(|e: toml::de::Error| ConfigError::SecretsFile {
        path: path.display().to_string(),
        reason: e.message().to_string(),
    })?;

    match table.get(key) {
        None => Ok(None),
        Some(toml::Value::String(value)) => Ok(Some(SecretString::new(value.as_str()))),
        Some(_) => Err(ConfigError::InvalidValue {
            var: key.into(),
            reason: "must be a string".into(),
        }),
    }
}
