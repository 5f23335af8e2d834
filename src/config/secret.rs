//! Redacting wrapper for the API credential.

use std::fmt;

/// Prefix shared by Google API keys.
pub const GOOGLE_KEY_PREFIX: &str = "AIza";

/// A string whose value never appears in Debug/Display output.
///
/// # Example
///
/// ```
/// use promptlab::config::SecretString;
///
/// let secret = SecretString::new("AIzaSy-example");
/// assert_eq!(format!("{:?}", secret), "<REDACTED>");
/// assert_eq!(secret.expose(), "AIzaSy-example");
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct SecretString(String);

impl SecretString {
    /// Wraps a credential value.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Returns the raw credential. Only call this at the HTTP boundary.
    #[must_use]
    pub fn expose(&self) -> &str {
        &self.0
    }

    /// Returns true if the secret is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns true if the secret contains any whitespace character.
    #[must_use]
    pub fn contains_whitespace(&self) -> bool {
        self.0.chars().any(char::is_whitespace)
    }

    /// Returns true if the secret carries the Google API key prefix.
    #[must_use]
    pub fn has_google_prefix(&self) -> bool {
        self.0.starts_with(GOOGLE_KEY_PREFIX)
    }
}

impl fmt::Debug for SecretString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("<REDACTED>")
    }
}

impl fmt::Display for SecretString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("<REDACTED>")
    }
}

impl From<String> for SecretString {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

impl From<&str> for SecretString {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}
