//! Gemini API client.
//!
//! This module provides:
//! - HTTP client for the Gemini `generateContent` endpoint
//! - Status-code to [`CompletionError`] mapping
//! - Response text extraction
//!
//! Each call issues exactly one HTTP request. Failures are returned to the
//! caller without any retry.

#![allow(clippy::missing_errors_doc)]

use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::{Client, StatusCode};

use super::config::ClientConfig;
use super::types::{
    ApiErrorEnvelope, GenerateContentRequest, GenerateContentResponse, GenerationConfig,
};
use crate::config::SecretString;
use crate::error::CompletionError;
use crate::traits::{CompletionClientTrait, CompletionConfig, CompletionResponse, Usage};

/// Header carrying the API key.
const API_KEY_HEADER: &str = "x-goog-api-key";

/// Gemini API client.
#[derive(Debug)]
pub struct GeminiClient {
    client: Client,
    api_key: SecretString,
    config: ClientConfig,
}

impl GeminiClient {
    /// Create a new Gemini client.
    pub fn new(api_key: SecretString, config: ClientConfig) -> Result<Self, CompletionError> {
        let timeout = Duration::from_millis(config.timeout_ms);
        let client =
            Client::builder()
                .timeout(timeout)
                .build()
                .map_err(|e| CompletionError::Network {
                    message: format!("Failed to create HTTP client: {e}"),
                })?;

        Ok(Self {
            client,
            api_key,
            config,
        })
    }

    /// Get the client configuration.
    #[must_use]
    pub const fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Send one `generateContent` request.
    pub async fn generate(
        &self,
        request: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse, CompletionError> {
        let url = self.config.endpoint();
        let start = Instant::now();

        tracing::debug!(
            url = %url,
            model = %self.config.model,
            timeout_ms = self.config.timeout_ms,
            "Starting Gemini API request"
        );

        let response = self
            .client
            .post(&url)
            .header(API_KEY_HEADER, self.api_key.expose())
            .json(request)
            .send()
            .await
            .map_err(|e| {
                let elapsed_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX);
                if e.is_timeout() {
                    tracing::error!(
                        url = %url,
                        elapsed_ms,
                        timeout_ms = self.config.timeout_ms,
                        "Gemini API request timed out"
                    );
                    CompletionError::Timeout {
                        timeout_ms: self.config.timeout_ms,
                    }
                } else {
                    tracing::error!(url = %url, elapsed_ms, error = %e, "Gemini API request failed");
                    CompletionError::Network {
                        message: e.to_string(),
                    }
                }
            })?;

        let status = response.status();
        tracing::debug!(
            url = %url,
            status = %status,
            elapsed_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX),
            "Gemini API response received"
        );

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Self::map_error_status(status, &body));
        }

        response
            .json()
            .await
            .map_err(|e| CompletionError::UnexpectedResponse {
                message: format!("Failed to parse response: {e}"),
            })
    }

    /// Map a non-success status and its body to an error.
    fn map_error_status(status: StatusCode, body: &str) -> CompletionError {
        let (message, api_status) = serde_json::from_str::<ApiErrorEnvelope>(body).map_or_else(
            |_| (body.trim().to_string(), String::new()),
            |envelope| (envelope.error.message, envelope.error.status),
        );

        match status.as_u16() {
            401 | 403 => CompletionError::AuthenticationFailed { message },
            400 if message.contains("API key") => CompletionError::AuthenticationFailed { message },
            429 => CompletionError::RateLimited { message },
            _ if api_status == "RESOURCE_EXHAUSTED" => CompletionError::RateLimited { message },
            _ => CompletionError::UnexpectedResponse {
                message: format!("Status {status}: {message}"),
            },
        }
    }

    /// Convert a successful response into relayable text.
    fn parse_response(
        response: &GenerateContentResponse,
    ) -> Result<CompletionResponse, CompletionError> {
        let text = response.text();

        if text.is_empty() {
            if let Some(reason) = response
                .prompt_feedback
                .as_ref()
                .and_then(|f| f.block_reason.clone())
            {
                return Err(CompletionError::Blocked { reason });
            }
            return Err(CompletionError::EmptyResponse);
        }

        let usage = response.usage_metadata.unwrap_or_default();
        let mut completion = CompletionResponse::new(
            text,
            Usage::new(usage.prompt_token_count, usage.candidates_token_count),
        );
        if let Some(reason) = response
            .candidates
            .first()
            .and_then(|c| c.finish_reason.as_deref())
        {
            completion = completion.with_finish_reason(reason);
        }
        Ok(completion)
    }
}

#[async_trait]
impl CompletionClientTrait for GeminiClient {
    async fn complete(
        &self,
        prompt: String,
        config: CompletionConfig,
    ) -> Result<CompletionResponse, CompletionError> {
        let mut request = GenerateContentRequest::from_prompt(prompt);
        if !config.is_model_default() {
            request = request.with_generation_config(GenerationConfig {
                temperature: config.temperature,
                max_output_tokens: config.max_output_tokens,
            });
        }

        let response = self.generate(&request).await?;
        Self::parse_response(&response)
    }

    fn model(&self) -> String {
        self.config.model.clone()
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    clippy::unused_async
)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const MODEL_PATH: &str = "/models/gemini-test:generateContent";

    fn create_mock_client(server: &MockServer) -> GeminiClient {
        let config = ClientConfig::default()
            .with_base_url(server.uri())
            .with_model("gemini-test")
            .with_timeout_ms(5_000);
        GeminiClient::new(SecretString::new("AIza-test-key"), config).unwrap()
    }

    fn success_response_body(text: &str) -> serde_json::Value {
        json!({
            "candidates": [{
                "content": {"role": "model", "parts": [{"text": text}]},
                "finishReason": "STOP"
            }],
            "usageMetadata": {"promptTokenCount": 10, "candidatesTokenCount": 20, "totalTokenCount": 30}
        })
    }

    fn error_body(code: u16, message: &str, status: &str) -> serde_json::Value {
        json!({"error": {"code": code, "message": message, "status": status}})
    }

    #[test]
    fn test_client_new() {
        let client =
            GeminiClient::new(SecretString::new("AIza-key"), ClientConfig::default()).unwrap();
        assert_eq!(
            client.config().base_url,
            "https://generativelanguage.googleapis.com/v1beta"
        );
        assert_eq!(client.model(), "gemini-2.0-flash");
    }

    #[test]
    fn test_client_debug_redacts_key() {
        let client =
            GeminiClient::new(SecretString::new("AIza-hidden"), ClientConfig::default()).unwrap();
        let debug = format!("{client:?}");
        assert!(debug.contains("GeminiClient"));
        assert!(!debug.contains("AIza-hidden"));
    }

    #[tokio::test]
    async fn test_complete_success() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path(MODEL_PATH))
            .and(header(API_KEY_HEADER, "AIza-test-key"))
            .and(body_json(json!({
                "contents": [{"role": "user", "parts": [{"text": "Hi"}]}]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(success_response_body("Hello!")))
            .expect(1)
            .mount(&server)
            .await;

        let client = create_mock_client(&server);
        let response = client
            .complete("Hi".to_string(), CompletionConfig::new())
            .await
            .unwrap();

        assert_eq!(response.content, "Hello!");
        assert_eq!(response.usage, Usage::new(10, 20));
        assert_eq!(response.finish_reason.as_deref(), Some("STOP"));
    }

    #[tokio::test]
    async fn test_complete_sends_generation_config() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path(MODEL_PATH))
            .and(body_json(json!({
                "contents": [{"role": "user", "parts": [{"text": "Hi"}]}],
                "generationConfig": {"maxOutputTokens": 512}
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(success_response_body("ok")))
            .expect(1)
            .mount(&server)
            .await;

        let client = create_mock_client(&server);
        let config = CompletionConfig::new().with_max_output_tokens(512);
        let response = client.complete("Hi".to_string(), config).await.unwrap();
        assert_eq!(response.content, "ok");
    }

    #[tokio::test]
    async fn test_complete_relays_text_verbatim() {
        let server = MockServer::start().await;
        let text = "  **Role:** expert\n\n<tag> & \"quotes\"  ";

        Mock::given(method("POST"))
            .and(path(MODEL_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_json(success_response_body(text)))
            .mount(&server)
            .await;

        let client = create_mock_client(&server);
        let response = client
            .complete("Hi".to_string(), CompletionConfig::new())
            .await
            .unwrap();
        assert_eq!(response.content, text);
    }

    #[tokio::test]
    async fn test_complete_rate_limited_is_not_retried() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path(MODEL_PATH))
            .respond_with(ResponseTemplate::new(429).set_body_json(error_body(
                429,
                "quota exceeded",
                "RESOURCE_EXHAUSTED",
            )))
            .expect(1)
            .mount(&server)
            .await;

        let client = create_mock_client(&server);
        let err = client
            .complete("Hi".to_string(), CompletionConfig::new())
            .await
            .unwrap_err();

        assert_eq!(
            err,
            CompletionError::RateLimited {
                message: "quota exceeded".to_string()
            }
        );
    }

    #[tokio::test]
    async fn test_complete_invalid_api_key() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path(MODEL_PATH))
            .respond_with(ResponseTemplate::new(400).set_body_json(error_body(
                400,
                "API key not valid. Please pass a valid API key.",
                "INVALID_ARGUMENT",
            )))
            .expect(1)
            .mount(&server)
            .await;

        let client = create_mock_client(&server);
        let err = client
            .complete("Hi".to_string(), CompletionConfig::new())
            .await
            .unwrap_err();
        assert!(matches!(err, CompletionError::AuthenticationFailed { .. }));
    }

    #[tokio::test]
    async fn test_complete_forbidden() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path(MODEL_PATH))
            .respond_with(ResponseTemplate::new(403).set_body_string("Forbidden"))
            .mount(&server)
            .await;

        let client = create_mock_client(&server);
        let err = client
            .complete("Hi".to_string(), CompletionConfig::new())
            .await
            .unwrap_err();
        assert_eq!(
            err,
            CompletionError::AuthenticationFailed {
                message: "Forbidden".to_string()
            }
        );
    }

    #[tokio::test]
    async fn test_complete_server_error() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path(MODEL_PATH))
            .respond_with(ResponseTemplate::new(500).set_body_string("Internal Server Error"))
            .expect(1)
            .mount(&server)
            .await;

        let client = create_mock_client(&server);
        let err = client
            .complete("Hi".to_string(), CompletionConfig::new())
            .await
            .unwrap_err();

        match err {
            CompletionError::UnexpectedResponse { message } => {
                assert!(message.contains("500"));
                assert!(message.contains("Internal Server Error"));
            }
            e => panic!("Wrong error type: {e:?}"),
        }
    }

    #[tokio::test]
    async fn test_complete_empty_candidates() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path(MODEL_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"candidates": []})))
            .mount(&server)
            .await;

        let client = create_mock_client(&server);
        let err = client
            .complete("Hi".to_string(), CompletionConfig::new())
            .await
            .unwrap_err();
        assert_eq!(err, CompletionError::EmptyResponse);
    }

    #[tokio::test]
    async fn test_complete_blocked_prompt() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path(MODEL_PATH))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"promptFeedback": {"blockReason": "SAFETY"}})),
            )
            .mount(&server)
            .await;

        let client = create_mock_client(&server);
        let err = client
            .complete("Hi".to_string(), CompletionConfig::new())
            .await
            .unwrap_err();
        assert_eq!(
            err,
            CompletionError::Blocked {
                reason: "SAFETY".to_string()
            }
        );
    }

    #[tokio::test]
    async fn test_complete_malformed_body() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path(MODEL_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;

        let client = create_mock_client(&server);
        let err = client
            .complete("Hi".to_string(), CompletionConfig::new())
            .await
            .unwrap_err();
        assert!(matches!(err, CompletionError::UnexpectedResponse { .. }));
    }

    #[tokio::test]
    async fn test_complete_network_error() {
        let config = ClientConfig::default()
            .with_base_url("http://127.0.0.1:1")
            .with_timeout_ms(2_000);
        let client = GeminiClient::new(SecretString::new("AIza-key"), config).unwrap();
        let err = client
            .complete("Hi".to_string(), CompletionConfig::new())
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            CompletionError::Network { .. } | CompletionError::Timeout { .. }
        ));
    }

    #[test]
    fn test_map_error_status_resource_exhausted_on_other_status() {
        let body = error_body(503, "capacity exhausted", "RESOURCE_EXHAUSTED").to_string();
        let err = GeminiClient::map_error_status(StatusCode::SERVICE_UNAVAILABLE, &body);
        assert!(matches!(err, CompletionError::RateLimited { .. }));
    }
}
