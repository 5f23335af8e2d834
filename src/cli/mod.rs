//! Command-line surface.
//!
//! ```text
//! promptlab enhance [PROMPT] [-m MODE] [--example] [--word-limit N] [--limit-words] [--citations]
//! promptlab preview [PROMPT] ...same flags...
//! promptlab modes
//! promptlab diagnose
//! ```
//!
//! Model output goes to stdout. Warnings, errors, the pending notice and
//! logs go to stderr.

use std::fmt::Write as _;
use std::io::Write;

use clap::{Args, Parser, Subcommand};
use tokio::io::AsyncReadExt;

use crate::assembler::{assemble, PromptParams, DEFAULT_WORD_LIMIT};
use crate::config::Config;
use crate::diagnose::run_diagnostics;
use crate::error::AppError;
use crate::gemini::{ClientConfig, GeminiClient};
use crate::lab::{Outcome, PromptLab, SubmitRequest, EXIT_WARNING};
use crate::prompts::{AddOnOptions, Mode, CATALOG};
use crate::traits::CompletionConfig;

/// Written to stderr while a completion call is in flight.
pub const PENDING_NOTICE: &str = "Enhancing prompt...";

/// PromptLab command line.
#[derive(Debug, Parser)]
#[command(name = "promptlab")]
#[command(version)]
#[command(
    about = "Turn rough prompts into structured ones with Gemini",
    long_about = None
)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Assemble a prompt and send it to Gemini
    #[clap(visible_alias = "e")]
    Enhance {
        #[command(flatten)]
        prompt: PromptArgs,
        /// Print the assembled prompt to stderr before sending it
        #[arg(long)]
        show_prompt: bool,
        /// Cap on generated tokens
        #[arg(long)]
        max_output_tokens: Option<u32>,
        /// Sampling temperature
        #[arg(long)]
        temperature: Option<f32>,
    },
    /// Print the assembled prompt without calling Gemini
    #[clap(visible_alias = "p")]
    Preview {
        #[command(flatten)]
        prompt: PromptArgs,
    },
    /// List available modes
    Modes,
    /// Check secrets, configuration and connectivity
    Diagnose,
}

/// Prompt text and assembly options shared by `enhance` and `preview`.
#[derive(Debug, Args)]
struct PromptArgs {
    /// Prompt text. Read from stdin when omitted
    prompt: Option<String>,
    /// Mode: shinobi, raikage, quick-refine, code-task, mini-brief
    #[arg(short, long, default_value_t = Mode::default())]
    mode: Mode,
    /// Ask for one short example when it removes ambiguity
    #[arg(long)]
    example: bool,
    /// Word limit (60-300)
    #[arg(short = 'w', long, default_value_t = DEFAULT_WORD_LIMIT)]
    word_limit: u32,
    /// Append the word-limit instruction (shinobi and raikage only)
    #[arg(short = 'l', long)]
    limit_words: bool,
    /// Require citations or an explicit unknown-answer statement
    #[arg(long)]
    citations: bool,
}

impl PromptArgs {
    const fn options(&self) -> AddOnOptions {
        AddOnOptions::none()
            .with_example(self.example)
            .with_word_limit(self.limit_words)
            .with_citations(self.citations)
    }

    fn into_request(self, input: String) -> SubmitRequest {
        let options = self.options();
        SubmitRequest::new(input, self.mode)
            .with_options(options)
            .with_params(PromptParams::new(self.word_limit))
    }

    /// Prompt from the argument, or all of stdin.
    async fn read_input(&mut self) -> Result<String, AppError> {
        if let Some(prompt) = self.prompt.take() {
            return Ok(prompt);
        }
        let mut input = String::new();
        tokio::io::stdin().read_to_string(&mut input).await?;
        Ok(input)
    }
}

impl Cli {
    /// Run the parsed command, returning the process exit code.
    ///
    /// # Errors
    ///
    /// Returns [`AppError`] on configuration failure or terminal I/O failure.
    /// Completion failures are reported through the exit code instead.
    pub async fn run(self) -> Result<i32, AppError> {
        self.run_with(&mut std::io::stdout(), &mut std::io::stderr())
            .await
    }

    /// Run the parsed command against the given output streams.
    ///
    /// # Errors
    ///
    /// Same as [`Cli::run`].
    pub async fn run_with<O: Write, E: Write>(
        self,
        out: &mut O,
        err: &mut E,
    ) -> Result<i32, AppError> {
        match self.command {
            Commands::Enhance {
                prompt,
                show_prompt,
                max_output_tokens,
                temperature,
            } => {
                let mut completion = CompletionConfig::new();
                if let Some(tokens) = max_output_tokens {
                    completion = completion.with_max_output_tokens(tokens);
                }
                if let Some(t) = temperature {
                    completion = completion.with_temperature(t);
                }
                run_enhance(prompt, show_prompt, completion, out, err).await
            }
            Commands::Preview { prompt } => run_preview(prompt, out, err).await,
            Commands::Modes => {
                write!(out, "{}", render_modes())?;
                Ok(0)
            }
            Commands::Diagnose => {
                let report = run_diagnostics().await;
                writeln!(out, "{report}")?;
                Ok(report.exit_code())
            }
        }
    }
}

async fn run_enhance<O: Write, E: Write>(
    mut args: PromptArgs,
    show_prompt: bool,
    completion: CompletionConfig,
    out: &mut O,
    err: &mut E,
) -> Result<i32, AppError> {
    let config = Config::from_env()?;
    tracing::info!(
        model = %config.model,
        timeout_ms = config.request_timeout_ms,
        "Configuration loaded"
    );

    let client = GeminiClient::new(config.api_key.clone(), ClientConfig::from_config(&config))?;
    let lab = PromptLab::new(client).with_completion_config(completion);

    let input = args.read_input().await?;
    let request = args.into_request(input);

    // Rejected input goes straight to its warning, with no notice.
    if let Ok(prompt) = assemble(
        &request.input,
        request.mode,
        &request.options,
        request.params,
    ) {
        if show_prompt {
            writeln!(err, "{prompt}\n---")?;
        }
        writeln!(err, "{PENDING_NOTICE}")?;
        err.flush()?;
    }

    let outcome = lab.submit(&request).await;
    print_outcome(&outcome, out, err)?;
    Ok(outcome.exit_code())
}

async fn run_preview<O: Write, E: Write>(
    mut args: PromptArgs,
    out: &mut O,
    err: &mut E,
) -> Result<i32, AppError> {
    let input = args.read_input().await?;
    let request = args.into_request(input);

    match assemble(
        &request.input,
        request.mode,
        &request.options,
        request.params,
    ) {
        Ok(prompt) => {
            writeln!(out, "{prompt}")?;
            Ok(0)
        }
        Err(failure) => {
            writeln!(err, "{failure}")?;
            Ok(EXIT_WARNING)
        }
    }
}

/// Model text to `out`, everything else to `err`.
fn print_outcome<O: Write, E: Write>(
    outcome: &Outcome,
    out: &mut O,
    err: &mut E,
) -> std::io::Result<()> {
    match outcome {
        Outcome::Enhanced(text) => writeln!(out, "{text}"),
        Outcome::Warning(text) | Outcome::Failed(text) => writeln!(err, "{text}"),
    }
}

/// One line per mode: id, label, summary, and whether it takes a word limit.
#[must_use]
pub fn render_modes() -> String {
    let mut out = String::new();
    for template in &CATALOG {
        let limit = if template.supports_limit {
            " [word limit]"
        } else {
            ""
        };
        let _ = writeln!(
            out,
            "{:<13} {}: {}{limit}",
            template.mode.as_str(),
            template.label,
            template.summary
        );
    }
    out
}
