//! Test utilities and mock factories.
//!
//! This module provides shared testing infrastructure:
//! - Mock completion clients
//! - Log capture for asserting on emitted events
//!
//! Only compiled for tests (`#[cfg(test)]`).

#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::io;
use std::sync::{Arc, Mutex};

use tracing::subscriber::DefaultGuard;
use tracing_subscriber::fmt::MakeWriter;

use crate::error::CompletionError;
use crate::traits::{CompletionResponse, MockCompletionClientTrait, Usage};

/// Model name reported by mock clients.
pub const MOCK_MODEL: &str = "gemini-test";

/// Create a mock client that returns a fixed response.
///
/// # Example
///
/// ```ignore
/// let mock = mock_completion_success("Hello!");
/// let result = mock.complete(prompt, config).await;
/// assert_eq!(result.unwrap().content, "Hello!");
/// ```
#[must_use]
pub fn mock_completion_success(response: impl Into<String>) -> MockCompletionClientTrait {
    let response = response.into();
    let mut mock = MockCompletionClientTrait::new();
    mock.expect_model().returning(|| MOCK_MODEL.to_string());
    mock.expect_complete()
        .returning(move |_prompt, _config| {
            Ok(CompletionResponse::new(response.clone(), Usage::new(10, 20)))
        });
    mock
}

/// Create a mock client that returns an error.
#[must_use]
pub fn mock_completion_error(error: CompletionError) -> MockCompletionClientTrait {
    let mut mock = MockCompletionClientTrait::new();
    mock.expect_model().returning(|| MOCK_MODEL.to_string());
    mock.expect_complete()
        .returning(move |_prompt, _config| Err(error.clone()));
    mock
}

/// In-memory log sink shared with a test subscriber.
#[derive(Debug, Clone, Default)]
pub struct LogBuffer(Arc<Mutex<Vec<u8>>>);

impl LogBuffer {
    /// Everything written so far.
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

impl io::Write for LogBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for LogBuffer {
    type Writer = Self;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

/// Route events at `level` and above on this thread into a buffer.
///
/// Capture stops when the returned guard is dropped.
pub fn capture_logs(level: tracing::Level) -> (LogBuffer, DefaultGuard) {
    let buffer = LogBuffer::default();
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_ansi(false)
        .with_writer(buffer.clone())
        .finish();
    let guard = tracing::subscriber::set_default(subscriber);
    (buffer, guard)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::{CompletionClientTrait, CompletionConfig};

    #[tokio::test]
    async fn test_mock_completion_success() {
        let mock = mock_completion_success("Hello!");
        let result = mock
            .complete("prompt".to_string(), CompletionConfig::new())
            .await;
        assert_eq!(result.unwrap().content, "Hello!");
        assert_eq!(mock.model(), MOCK_MODEL);
    }

    #[tokio::test]
    async fn test_mock_completion_error() {
        let mock = mock_completion_error(CompletionError::EmptyResponse);
        let result = mock
            .complete("prompt".to_string(), CompletionConfig::new())
            .await;
        assert_eq!(result.unwrap_err(), CompletionError::EmptyResponse);
    }

    #[test]
    fn test_capture_logs_respects_level() {
        let (logs, _guard) = capture_logs(tracing::Level::INFO);
        tracing::info!(answer = 42, "kept");
        tracing::debug!("dropped");
        let contents = logs.contents();
        assert!(contents.contains("kept answer=42"));
        assert!(!contents.contains("dropped"));
    }
}
