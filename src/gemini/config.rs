//! Gemini client configuration.

#![allow(clippy::missing_const_for_fn)]

use crate::config::{Config, DEFAULT_BASE_URL, DEFAULT_MODEL, DEFAULT_REQUEST_TIMEOUT_MS};

/// Client configuration for the Gemini API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Base URL for the API, without trailing slash.
    pub base_url: String,
    /// Model identifier.
    pub model: String,
    /// Request timeout in milliseconds.
    pub timeout_ms: u64,
}

impl ClientConfig {
    /// Create a new client configuration with defaults.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Client configuration derived from the process configuration.
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        Self {
            base_url: config.base_url.clone(),
            model: config.model.clone(),
            timeout_ms: config.request_timeout_ms,
        }
    }

    /// Set base URL.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Set model.
    #[must_use]
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Set timeout in milliseconds.
    #[must_use]
    pub const fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    /// Full `generateContent` endpoint URL.
    #[must_use]
    pub fn endpoint(&self) -> String {
        format!("{}/models/{}:generateContent", self.base_url, self.model)
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            timeout_ms: DEFAULT_REQUEST_TIMEOUT_MS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SecretString;

    #[test]
    fn test_client_config_default() {
        let config = ClientConfig::default();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.model, DEFAULT_MODEL);
        assert_eq!(config.timeout_ms, DEFAULT_REQUEST_TIMEOUT_MS);
    }

    #[test]
    fn test_endpoint() {
        let config = ClientConfig::new()
            .with_base_url("http://localhost:8080/v1beta/")
            .with_model("gemini-test");
        assert_eq!(
            config.endpoint(),
            "http://localhost:8080/v1beta/models/gemini-test:generateContent"
        );
    }

    #[test]
    fn test_from_config() {
        let config = Config {
            api_key: SecretString::new("AIzaKey"),
            model: "gemini-1.5-flash".to_string(),
            base_url: "http://example.test".to_string(),
            log_level: "info".to_string(),
            request_timeout_ms: 12_000,
        };
        let client_config = ClientConfig::from_config(&config);
        assert_eq!(client_config.model, "gemini-1.5-flash");
        assert_eq!(client_config.base_url, "http://example.test");
        assert_eq!(client_config.timeout_ms, 12_000);
    }
}
