//! Error types for PromptLab.
//!
//! This module defines a hierarchical error system:
//! - [`AppError`]: Top-level application errors
//! - [`ValidationFailure`]: Rejected user input (recovered as a warning)
//! - [`CompletionError`]: Failures of the Gemini completion call
//! - [`ConfigError`]: Configuration errors (fatal at startup)
//!
//! All errors implement `Send + Sync` for async compatibility.

use thiserror::Error;

/// Top-level application error.
///
/// This is the error type returned by the binary's command handlers.
/// It wraps all subsystem errors for unified error handling.
#[derive(Debug, Error)]
pub enum AppError {
    /// Input validation error.
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationFailure),

    /// Completion call error.
    #[error("Gemini API error: {0}")]
    Completion(#[from] CompletionError),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Terminal I/O error.
    #[error("I/O error: {message}")]
    Io {
        /// Description of the I/O failure.
        message: String,
    },
}

/// Rejected prompt input.
///
/// Validation failures never reach template lookup or the completion call.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationFailure {
    /// The prompt was empty or contained only whitespace.
    #[error("Please enter a prompt before generating.")]
    EmptyInput,

    /// The requested word limit is outside the accepted range.
    #[error("Word limit {value} is outside the allowed range {min}-{max}")]
    WordLimitOutOfRange {
        /// Requested limit.
        value: u32,
        /// Smallest accepted limit.
        min: u32,
        /// Largest accepted limit.
        max: u32,
    },
}

/// Gemini completion call errors.
///
/// Every variant is surfaced to the user as-is. None of them is retried.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CompletionError {
    /// The API key was rejected.
    #[error("Authentication failed: {message}")]
    AuthenticationFailed {
        /// Detail reported by the API.
        message: String,
    },

    /// Request was rate limited or the quota is exhausted.
    #[error("Rate limited: {message}")]
    RateLimited {
        /// Detail reported by the API.
        message: String,
    },

    /// Request timed out.
    #[error("Request timeout after {timeout_ms}ms")]
    Timeout {
        /// Timeout duration in milliseconds.
        timeout_ms: u64,
    },

    /// Network communication error.
    #[error("Network error: {message}")]
    Network {
        /// Description of the network error.
        message: String,
    },

    /// The prompt was blocked by the model's safety filters.
    #[error("Prompt blocked: {reason}")]
    Blocked {
        /// Block reason reported by the API.
        reason: String,
    },

    /// The API answered without any text.
    #[error("No response received.")]
    EmptyResponse,

    /// Unexpected response from the API.
    #[error("Unexpected response: {message}")]
    UnexpectedResponse {
        /// Description of what was unexpected.
        message: String,
    },
}

/// Configuration errors.
///
/// These errors represent failures in configuration loading and validation.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Required configuration is missing.
    #[error("Missing required: {var}")]
    MissingRequired {
        /// The missing variable name.
        var: String,
    },

    /// Configuration value is invalid.
    #[error("Invalid value for {var}: {reason}")]
    InvalidValue {
        /// The variable name.
        var: String,
        /// Why the value is invalid.
        reason: String,
    },

    /// The secrets file exists but could not be read or parsed.
    #[error("Unreadable secrets file {path}: {reason}")]
    SecretsFile {
        /// Path of the secrets file.
        path: String,
        /// Read or parse failure.
        reason: String,
    },
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: err.to_string(),
        }
    }
}
