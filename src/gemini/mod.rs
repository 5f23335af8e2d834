//! Gemini API client.
//!
//! This module provides:
//! - A `reqwest` client for `models/{model}:generateContent`
//! - Serde request/response types
//! - Client configuration
//!
//! The client implements [`CompletionClientTrait`](crate::traits::CompletionClientTrait),
//! so the prompt lab can run against a mock in tests.

mod client;
mod config;
mod types;

pub use client::GeminiClient;
pub use config::ClientConfig;
pub use types::{
    ApiErrorBody, ApiErrorEnvelope, Candidate, Content, GenerateContentRequest,
    GenerateContentResponse, GenerationConfig, Part, PromptFeedback, UsageMetadata,
};
