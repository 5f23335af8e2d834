//! Environment diagnostics.
//!
//! `promptlab diagnose` runs a fixed sequence of checks and prints one line
//! per check. Individual checks take their inputs explicitly so they can be
//! exercised against temporary files and local listeners.

use std::fmt;
use std::path::Path;
use std::time::Duration;

use tokio::net::TcpStream;
use url::Url;

use crate::config::{
    load_dotenv, resolve_api_key, secrets_file_path, Config, KeySource, SecretString,
    API_KEY_VAR, GOOGLE_KEY_PREFIX,
};
use crate::error::ConfigError;

/// Timeout for the endpoint reachability check.
pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

/// Result of a single check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckStatus {
    /// Check passed.
    Pass,
    /// Something looks off but will not stop PromptLab from running.
    Warn,
    /// PromptLab will not work until this is fixed.
    Fail,
}

impl CheckStatus {
    /// Marker printed in front of the check line.
    #[must_use]
    pub const fn marker(&self) -> &'static str {
        match self {
            Self::Pass => "✓",
            Self::Warn => "!",
            Self::Fail => "✗",
        }
    }
}

/// One line of the report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckResult {
    /// Short check name.
    pub name: &'static str,
    /// Outcome.
    pub status: CheckStatus,
    /// Human-readable detail.
    pub detail: String,
}

impl CheckResult {
    fn pass(name: &'static str, detail: impl Into<String>) -> Self {
        Self {
            name,
            status: CheckStatus::Pass,
            detail: detail.into(),
        }
    }

    fn warn(name: &'static str, detail: impl Into<String>) -> Self {
        Self {
            name,
            status: CheckStatus::Warn,
            detail: detail.into(),
        }
    }

    fn fail(name: &'static str, detail: impl Into<String>) -> Self {
        Self {
            name,
            status: CheckStatus::Fail,
            detail: detail.into(),
        }
    }
}

impl fmt::Display for CheckResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}: {}", self.status.marker(), self.name, self.detail)
    }
}

/// Ordered results of a diagnostic run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DiagnosticReport {
    checks: Vec<CheckResult>,
}

impl DiagnosticReport {
    /// Empty report.
    #[must_use]
    pub const fn new() -> Self {
        Self { checks: Vec::new() }
    }

    /// Append a result.
    pub fn push(&mut self, check: CheckResult) {
        tracing::debug!(check = check.name, status = ?check.status, "Diagnostic check");
        self.checks.push(check);
    }

    /// Results in run order.
    #[must_use]
    pub fn checks(&self) -> &[CheckResult] {
        &self.checks
    }

    /// Number of failed checks.
    #[must_use]
    pub fn failures(&self) -> usize {
        self.checks
            .iter()
            .filter(|c| c.status == CheckStatus::Fail)
            .count()
    }

    /// Returns true if no check failed.
    #[must_use]
    pub fn passed(&self) -> bool {
        self.failures() == 0
    }

    /// Process exit code: 0 when every check passed or warned, 1 otherwise.
    #[must_use]
    pub fn exit_code(&self) -> i32 {
        i32::from(!self.passed())
    }
}

impl fmt::Display for DiagnosticReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== PromptLab Diagnostic ===")?;
        writeln!(f)?;
        for check in &self.checks {
            writeln!(f, "{check}")?;
        }
        writeln!(f)?;
        if self.passed() {
            write!(f, "=== All checks passed! ===")
        } else {
            write!(f, "=== {} check(s) failed ===", self.failures())
        }
    }
}

/// Report the package version.
#[must_use]
pub fn check_version() -> CheckResult {
    CheckResult::pass("version", format!("promptlab {}", env!("CARGO_PKG_VERSION")))
}

/// Check that the secrets file exists.
///
/// A missing file only fails when the environment does not supply the key.
#[must_use]
pub fn check_secrets_file(path: &Path, env_has_key: bool) -> CheckResult {
    const NAME: &str = "secrets file";

    match std::fs::metadata(path) {
        Ok(meta) if meta.is_file() => CheckResult::pass(
            NAME,
            format!("{} exists ({} bytes)", path.display(), meta.len()),
        ),
        Ok(_) => CheckResult::fail(NAME, format!("{} is not a file", path.display())),
        Err(_) if env_has_key => CheckResult::pass(
            NAME,
            format!(
                "{} not found, {API_KEY_VAR} comes from the environment",
                path.display()
            ),
        ),
        Err(_) => CheckResult::fail(NAME, format!("{} not found", path.display())),
    }
}

/// Check that a well-formed API key was found.
#[must_use]
pub fn check_api_key(resolved: &Result<(SecretString, KeySource), ConfigError>) -> CheckResult {
    const NAME: &str = "API key";

    match resolved {
        Err(e) => CheckResult::fail(NAME, e.to_string()),
        Ok((key, _)) if key.is_empty() || key.contains_whitespace() => {
            CheckResult::fail(NAME, "invalid format (empty or contains whitespace)")
        }
        Ok((key, source)) => {
            let origin = match source {
                KeySource::Environment => "environment",
                KeySource::SecretsFile => "secrets file",
            };
            if key.has_google_prefix() {
                CheckResult::pass(
                    NAME,
                    format!("present in {origin} (starts with {GOOGLE_KEY_PREFIX}...)"),
                )
            } else {
                CheckResult::warn(
                    NAME,
                    format!("present in {origin} but does not start with {GOOGLE_KEY_PREFIX}"),
                )
            }
        }
    }
}

/// Check that the full configuration loads.
#[must_use]
pub fn check_config(loaded: &Result<Config, ConfigError>) -> CheckResult {
    const NAME: &str = "configuration";

    match loaded {
        Ok(config) => CheckResult::pass(
            NAME,
            format!(
                "model={}, timeout={}ms",
                config.model, config.request_timeout_ms
            ),
        ),
        Err(e) => CheckResult::fail(NAME, e.to_string()),
    }
}

/// Check that the completion endpoint host accepts TCP connections.
pub async fn check_endpoint(base_url: &str, timeout: Duration) -> CheckResult {
    const NAME: &str = "endpoint";

    let url = match Url::parse(base_url) {
        Ok(url) => url,
        Err(e) => return CheckResult::fail(NAME, format!("invalid URL {base_url}: {e}")),
    };
    let (Some(host), Some(port)) = (url.host_str(), url.port_or_known_default()) else {
        return CheckResult::fail(NAME, format!("no host or port in {base_url}"));
    };
    let address = format!("{host}:{port}");

    match tokio::time::timeout(timeout, TcpStream::connect(&address)).await {
        Ok(Ok(_)) => CheckResult::pass(NAME, format!("{address} is reachable")),
        Ok(Err(e)) => CheckResult::fail(NAME, format!("{address} is unreachable: {e}")),
        Err(_) => CheckResult::fail(
            NAME,
            format!("{address} did not answer within {}ms", timeout.as_millis()),
        ),
    }
}

/// Run every check against the current environment.
pub async fn run_diagnostics() -> DiagnosticReport {
    load_dotenv();

    let mut report = DiagnosticReport::new();
    report.push(check_version());

    let env_has_key = std::env::var_os(API_KEY_VAR).is_some();
    report.push(check_secrets_file(&secrets_file_path(), env_has_key));
    report.push(check_api_key(&resolve_api_key()));

    let loaded = Config::from_env();
    report.push(check_config(&loaded));

    let base_url = loaded.as_ref().map_or_else(
        |_| {
            std::env::var("GEMINI_BASE_URL")
                .unwrap_or_else(|_| crate::config::DEFAULT_BASE_URL.to_string())
        },
        |config| config.base_url.clone(),
    );
    report.push(check_endpoint(&base_url, CONNECT_TIMEOUT).await);

    report
}
