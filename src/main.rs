//! PromptLab binary entry point.
//!
//! All logs go to stderr; stdout is reserved for model output and previews.
//!
//! Coverage is excluded because `main` only wires logging, argument parsing
//! and the process exit code.

// Enable the coverage attribute when running with nightly for llvm-cov exclusions
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

use clap::Parser;
use promptlab::cli::Cli;
use promptlab::config::{self, DEFAULT_LOG_LEVEL};

#[cfg_attr(coverage_nightly, coverage(off))]
#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // .env may carry LOG_LEVEL, so load it before the filter is built
    config::load_dotenv();

    // Initialize logging to stderr only (stdout carries the response text)
    tracing_subscriber::fmt()
        .with_env_filter(
            config::log_level()
                .parse()
                .unwrap_or_else(|_| tracing_subscriber::filter::EnvFilter::new(DEFAULT_LOG_LEVEL)),
        )
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();

    tracing::debug!(version = env!("CARGO_PKG_VERSION"), "promptlab starting");

    match cli.run().await {
        Ok(0) => {}
        Ok(code) => std::process::exit(code),
        Err(e) => {
            tracing::debug!(error = ?e, "Command failed");
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    }
}
