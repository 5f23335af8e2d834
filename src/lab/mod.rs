//! Prompt lab session.
//!
//! A [`PromptLab`] drives one submission through its lifecycle:
//!
//! ```text
//! Idle -> Validating -> Assembling -> AwaitingCompletion -> Displaying
//!            |              |                  |
//!            |              |                  +-> Displaying(error)
//!            |              +-> Displaying(warning: word limit)
//!            +-> Displaying(warning: empty prompt)
//! ```
//!
//! Every path ends in an [`Outcome`], which already carries the text to show.
//! Submissions are independent: nothing is kept between calls.

use std::fmt;

use tracing::Instrument;

use crate::assembler::{assemble, PromptParams};
use crate::error::ValidationFailure;
use crate::prompts::{AddOnOptions, Mode};
use crate::traits::{CompletionClientTrait, CompletionConfig};

/// Prefix of every failure message shown to the user.
pub const FAILURE_PREFIX: &str = "❌ Gemini error: ";

/// Exit code for rejected input. Distinct from clap's usage-error code 2.
pub const EXIT_WARNING: i32 = 3;

/// Lifecycle state of a submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Waiting for input.
    Idle,
    /// Checking the raw input.
    Validating,
    /// Building the prompt text.
    Assembling,
    /// Completion call in flight.
    AwaitingCompletion,
    /// Result, warning or error is on screen.
    Displaying,
}

impl SessionState {
    /// State name used in logs.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Validating => "validating",
            Self::Assembling => "assembling",
            Self::AwaitingCompletion => "awaiting_completion",
            Self::Displaying => "displaying",
        }
    }
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Everything the user chose for one submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitRequest {
    /// Raw prompt text, exactly as entered.
    pub input: String,
    /// Selected mode.
    pub mode: Mode,
    /// Add-on toggles.
    pub options: AddOnOptions,
    /// Numeric parameters.
    pub params: PromptParams,
}

impl SubmitRequest {
    /// Request with no add-ons and default parameters.
    #[must_use]
    pub fn new(input: impl Into<String>, mode: Mode) -> Self {
        Self {
            input: input.into(),
            mode,
            options: AddOnOptions::none(),
            params: PromptParams::default(),
        }
    }

    /// Set add-on toggles.
    #[must_use]
    pub const fn with_options(mut self, options: AddOnOptions) -> Self {
        self.options = options;
        self
    }

    /// Set numeric parameters.
    #[must_use]
    pub const fn with_params(mut self, params: PromptParams) -> Self {
        self.params = params;
        self
    }
}

/// What the user sees after a submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Model output, relayed verbatim.
    Enhanced(String),
    /// Input was rejected; nothing was sent.
    Warning(String),
    /// The completion call failed.
    Failed(String),
}

impl Outcome {
    /// Text to display.
    #[must_use]
    pub fn message(&self) -> &str {
        match self {
            Self::Enhanced(text) | Self::Warning(text) | Self::Failed(text) => text,
        }
    }

    /// Returns true for [`Outcome::Enhanced`].
    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Enhanced(_))
    }

    /// Process exit code for the CLI.
    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::Enhanced(_) => 0,
            Self::Failed(_) => 1,
            Self::Warning(_) => EXIT_WARNING,
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// Prompt lab driving submissions against a completion client.
///
/// # Example
///
/// ```ignore
/// use promptlab::lab::{PromptLab, SubmitRequest};
/// use promptlab::prompts::Mode;
///
/// let lab = PromptLab::new(client);
/// let outcome = lab.submit(&SubmitRequest::new("Explain DNS", Mode::Shinobi)).await;
/// println!("{outcome}");
/// ```
pub struct PromptLab<C>
where
    C: CompletionClientTrait,
{
    client: C,
    completion: CompletionConfig,
}

impl<C> PromptLab<C>
where
    C: CompletionClientTrait,
{
    /// Create a lab using the service's default generation options.
    #[must_use]
    pub fn new(client: C) -> Self {
        Self {
            client,
            completion: CompletionConfig::new(),
        }
    }

    /// Set generation options sent with every request.
    #[must_use]
    pub fn with_completion_config(mut self, completion: CompletionConfig) -> Self {
        self.completion = completion;
        self
    }

    /// Get the completion client.
    #[must_use]
    pub const fn client(&self) -> &C {
        &self.client
    }

    /// Run one submission to completion.
    ///
    /// Validation failures become [`Outcome::Warning`] without contacting
    /// the client. Client errors become [`Outcome::Failed`]. The client is
    /// called at most once.
    pub async fn submit(&self, request: &SubmitRequest) -> Outcome {
        let request_id = uuid::Uuid::new_v4();
        let span = tracing::info_span!(
            "submit",
            request_id = %request_id,
            mode = %request.mode,
            model = %self.client.model(),
        );
        self.run(request).instrument(span).await
    }

    async fn run(&self, request: &SubmitRequest) -> Outcome {
        transition(SessionState::Idle, SessionState::Validating);
        if request.input.trim().is_empty() {
            return reject(SessionState::Validating, &ValidationFailure::EmptyInput);
        }

        transition(SessionState::Validating, SessionState::Assembling);
        let prompt = match assemble(
            &request.input,
            request.mode,
            &request.options,
            request.params,
        ) {
            Ok(prompt) => prompt,
            Err(failure) => return reject(SessionState::Assembling, &failure),
        };

        transition(SessionState::Assembling, SessionState::AwaitingCompletion);
        let result = self
            .client
            .complete(prompt.into_string(), self.completion.clone())
            .await;
        transition(SessionState::AwaitingCompletion, SessionState::Displaying);

        match result {
            Ok(response) => {
                tracing::info!(
                    prompt_tokens = response.usage.prompt_tokens,
                    candidate_tokens = response.usage.candidate_tokens,
                    response_len = response.content.len(),
                    "Completion received"
                );
                Outcome::Enhanced(response.content)
            }
            Err(e) => {
                tracing::debug!(error = %e, "Completion failed");
                Outcome::Failed(format!("{FAILURE_PREFIX}{e}"))
            }
        }
    }
}

fn transition(from: SessionState, to: SessionState) {
    tracing::debug!(from = %from, to = %to, "Session state");
}

fn reject(from: SessionState, failure: &ValidationFailure) -> Outcome {
    tracing::debug!(reason = %failure, "Submission rejected");
    transition(from, SessionState::Displaying);
    Outcome::Warning(failure.to_string())
}
