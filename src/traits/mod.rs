//! Trait definitions for mockable dependencies.
//!
//! This module defines [`CompletionClientTrait`], the seam between the
//! prompt lab and the remote text-completion service, and re-exports the
//! request/response types from the `types` submodule.
//!
//! # Mocking
//!
//! The trait is annotated with `#[cfg_attr(test, mockall::automock)]`
//! which generates a mock implementation automatically for testing.

mod types;

pub use types::{CompletionConfig, CompletionResponse, Usage};

use async_trait::async_trait;

use crate::error::CompletionError;

/// Text-completion client trait for mocking.
///
/// Implementations send `prompt` as the entire content of exactly one
/// request. They must not retry.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CompletionClientTrait: Send + Sync {
    /// Send a completion request.
    ///
    /// # Arguments
    ///
    /// * `prompt` - The assembled prompt, passed through unmodified
    /// * `config` - Generation options
    ///
    /// # Errors
    ///
    /// Returns [`CompletionError`] if the call fails or yields no text.
    async fn complete(
        &self,
        prompt: String,
        config: CompletionConfig,
    ) -> Result<CompletionResponse, CompletionError>;

    /// Model identifier requests are sent to.
    fn model(&self) -> String;
}
