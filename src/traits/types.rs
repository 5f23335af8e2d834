//! Values passed across [`CompletionClientTrait`](super::CompletionClientTrait).
//!
//! - [`CompletionConfig`]: sampling options for one request
//! - [`CompletionResponse`]: the relayed text plus accounting
//! - [`Usage`]: prompt and candidate token counts

/// Sampling options.
///
/// `None` fields are left out of the request, so the model's own defaults
/// apply. PromptLab sends no options unless the CLI asks for them.
#[derive(Debug, Clone, Default, PartialEq)]
// f32 has no Eq
#[allow(clippy::derive_partial_eq_without_eq)]
pub struct CompletionConfig {
    /// Cap on generated tokens.
    pub max_output_tokens: Option<u32>,
    /// Sampling temperature, 0.0 to 2.0 for Gemini models.
    pub temperature: Option<f32>,
}

impl CompletionConfig {
    /// Options that defer everything to the model.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Cap generated tokens.
    #[must_use]
    pub const fn with_max_output_tokens(mut self, tokens: u32) -> Self {
        self.max_output_tokens = Some(tokens);
        self
    }

    /// Set sampling temperature.
    #[must_use]
    pub const fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    /// Returns true if no option overrides the model defaults.
    #[must_use]
    pub const fn is_model_default(&self) -> bool {
        self.max_output_tokens.is_none() && self.temperature.is_none()
    }
}

/// Token accounting reported by the service.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Usage {
    /// Tokens in the submitted prompt.
    pub prompt_tokens: u32,
    /// Tokens in the returned candidate.
    pub candidate_tokens: u32,
}

impl Usage {
    /// Usage from prompt and candidate counts.
    #[must_use]
    pub const fn new(prompt_tokens: u32, candidate_tokens: u32) -> Self {
        Self {
            prompt_tokens,
            candidate_tokens,
        }
    }

    /// Sum of both counts, saturating.
    #[must_use]
    pub const fn total(&self) -> u32 {
        self.prompt_tokens.saturating_add(self.candidate_tokens)
    }
}

/// Text returned by one completion call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionResponse {
    /// Model output, never trimmed or rewritten.
    pub content: String,
    /// Token accounting.
    pub usage: Usage,
    /// Why generation stopped, when reported.
    pub finish_reason: Option<String>,
}

impl CompletionResponse {
    /// Response without a finish reason.
    #[must_use]
    pub fn new(content: impl Into<String>, usage: Usage) -> Self {
        Self {
            content: content.into(),
            usage,
            finish_reason: None,
        }
    }

    /// Attach the finish reason.
    #[must_use]
    pub fn with_finish_reason(mut self, reason: impl Into<String>) -> Self {
        self.finish_reason = Some(reason.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use static_assertions::assert_impl_all;

    assert_impl_all!(CompletionConfig: Send, Sync, Clone, Default);
    assert_impl_all!(Usage: Send, Sync, Copy, Eq);
    assert_impl_all!(CompletionResponse: Send, Sync, Clone, Eq);

    #[test]
    fn test_new_config_defers_to_model() {
        assert!(CompletionConfig::new().is_model_default());
    }

    #[test]
    fn test_config_overrides() {
        let config = CompletionConfig::new()
            .with_max_output_tokens(1024)
            .with_temperature(0.4);
        assert!(!config.is_model_default());
        assert_eq!(config.max_output_tokens, Some(1024));
        assert!((config.temperature.unwrap_or(0.0) - 0.4).abs() < f32::EPSILON);
    }

    #[test]
    fn test_usage_total_saturates() {
        assert_eq!(Usage::new(100, 50).total(), 150);
        assert_eq!(Usage::new(u32::MAX, 1).total(), u32::MAX);
    }

    #[test]
    fn test_response_finish_reason() {
        let response = CompletionResponse::new("Hello", Usage::new(1, 2)).with_finish_reason("STOP");
        assert_eq!(response.content, "Hello");
        assert_eq!(response.finish_reason.as_deref(), Some("STOP"));
        assert_eq!(response.usage.candidate_tokens, 2);
    }
}
