// system-tests/src/config/env.rs
// ============================================================================
// Module: System Test Environment
// Description: Environment-backed configuration for the scenario suite.
// Purpose: Centralize env parsing with strict UTF-8 validation.
// Dependencies: url
// ============================================================================

//! ## Overview
//! Environment values are parsed with strict UTF-8 enforcement to avoid silent
//! misconfiguration. Invalid UTF-8, empty values, and unparseable numbers fail
//! closed. The base URL is resolved here once, before any scenario runs.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::num::NonZeroUsize;
use std::path::PathBuf;
use std::time::Duration;

use url::Url;

// ============================================================================
// SECTION: Environment Constants
// ============================================================================

/// Base URL used when `PRODUCTS_API_BASE_URL` is unset.
pub const DEFAULT_BASE_URL: &str = "https://dummyjson.com";
/// Default per-scenario wall-clock budget.
pub const DEFAULT_SCENARIO_TIMEOUT: Duration = Duration::from_secs(30);
/// Default per-request transport timeout.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);
/// Scenario retries applied in CI mode.
pub const CI_RETRIES: u32 = 2;
/// `PRODUCTS_SYSTEM_TEST_AUDIT_LOG` value that selects stderr.
pub const STDERR_AUDIT_LOG: &str = "-";

/// Environment keys for system test configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SystemTestEnv {
    /// Base URL of the remote API.
    BaseUrl,
    /// CI mode toggle (`true`/`false` or `1`/`0`).
    Ci,
    /// Per-scenario timeout in seconds (positive integer).
    TimeoutSeconds,
    /// Per-request timeout in seconds (positive integer).
    RequestTimeoutSeconds,
    /// Scenario retry count (non-negative integer).
    Retries,
    /// Maximum concurrently running scenarios (positive integer).
    Workers,
    /// Optional run root override.
    RunRoot,
    /// Optional request audit log path.
    AuditLog,
}

impl SystemTestEnv {
    /// Every key, in documentation order.
    pub const ALL: [Self; 8] = [
        Self::BaseUrl,
        Self::Ci,
        Self::TimeoutSeconds,
        Self::RequestTimeoutSeconds,
        Self::Retries,
        Self::Workers,
        Self::RunRoot,
        Self::AuditLog,
    ];

    /// Returns the canonical environment variable name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::BaseUrl => "PRODUCTS_API_BASE_URL",
            Self::Ci => "CI",
            Self::TimeoutSeconds => "PRODUCTS_SYSTEM_TEST_TIMEOUT_SEC",
            Self::RequestTimeoutSeconds => "PRODUCTS_SYSTEM_TEST_REQUEST_TIMEOUT_SEC",
            Self::Retries => "PRODUCTS_SYSTEM_TEST_RETRIES",
            Self::Workers => "PRODUCTS_SYSTEM_TEST_WORKERS",
            Self::RunRoot => "PRODUCTS_SYSTEM_TEST_RUN_ROOT",
            Self::AuditLog => "PRODUCTS_SYSTEM_TEST_AUDIT_LOG",
        }
    }
}

// ============================================================================
// SECTION: Config Types
// ============================================================================

/// Destination for request audit lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuditTarget {
    /// JSON lines on stderr.
    Stderr,
    /// JSON lines appended to a file.
    File(PathBuf),
}

impl AuditTarget {
    /// Parses a non-empty `PRODUCTS_SYSTEM_TEST_AUDIT_LOG` value.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        if raw == STDERR_AUDIT_LOG { Self::Stderr } else { Self::File(PathBuf::from(raw)) }
    }
}

/// Typed system test configuration derived from environment variables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SystemTestConfig {
    /// Remote API base URL (http or https).
    pub base_url: Url,
    /// True when running under CI.
    pub ci: bool,
    /// Wall-clock budget for one scenario attempt.
    pub scenario_timeout: Duration,
    /// Transport timeout for one request.
    pub request_timeout: Duration,
    /// Additional attempts after a failed scenario.
    pub retries: u32,
    /// Maximum concurrently running scenarios.
    pub workers: usize,
    /// Optional run root override.
    pub run_root: Option<PathBuf>,
    /// Optional request audit destination.
    pub audit_log: Option<AuditTarget>,
}

impl SystemTestConfig {
    /// Loads configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error when an environment value is not valid UTF-8, is empty,
    /// or fails validation (for example, a non-http base URL or a zero timeout).
    pub fn load() -> Result<Self, String> {
        let base_url = read_env_nonempty(SystemTestEnv::BaseUrl.as_str())?
            .map_or_else(|| parse_base_url(DEFAULT_BASE_URL), |raw| parse_base_url(&raw))
            .map_err(|err| format!("{} {err}", SystemTestEnv::BaseUrl.as_str()))?;
        let ci = parse_bool_env(
            SystemTestEnv::Ci.as_str(),
            read_env_nonempty(SystemTestEnv::Ci.as_str())?,
        )?;
        let scenario_timeout = read_env_nonempty(SystemTestEnv::TimeoutSeconds.as_str())?
            .map(|value| parse_timeout_seconds(SystemTestEnv::TimeoutSeconds.as_str(), &value))
            .transpose()?
            .unwrap_or(DEFAULT_SCENARIO_TIMEOUT);
        let request_timeout = read_env_nonempty(SystemTestEnv::RequestTimeoutSeconds.as_str())?
            .map(|value| {
                parse_timeout_seconds(SystemTestEnv::RequestTimeoutSeconds.as_str(), &value)
            })
            .transpose()?
            .unwrap_or(DEFAULT_REQUEST_TIMEOUT);
        let retries = read_env_nonempty(SystemTestEnv::Retries.as_str())?
            .map(|value| parse_retries(SystemTestEnv::Retries.as_str(), &value))
            .transpose()?
            .unwrap_or(if ci { CI_RETRIES } else { 0 });
        let workers = read_env_nonempty(SystemTestEnv::Workers.as_str())?
            .map(|value| parse_workers(SystemTestEnv::Workers.as_str(), &value))
            .transpose()?
            .unwrap_or_else(|| default_workers(ci));
        let run_root = read_env_nonempty(SystemTestEnv::RunRoot.as_str())?.map(PathBuf::from);
        let audit_log = read_env_nonempty(SystemTestEnv::AuditLog.as_str())?
            .map(|raw| AuditTarget::parse(&raw));
        Ok(Self {
            base_url,
            ci,
            scenario_timeout,
            request_timeout,
            retries,
            workers,
            run_root,
            audit_log,
        })
    }

    /// Returns a copy pointed at `base_url`, keeping every other setting.
    #[must_use]
    pub fn with_base_url(mut self, base_url: Url) -> Self {
        self.base_url = base_url;
        self
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Reads an environment variable and enforces UTF-8 validity.
///
/// # Errors
///
/// Returns an error when the environment variable contains invalid UTF-8.
pub fn read_env_strict(name: &str) -> Result<Option<String>, String> {
    std::env::var_os(name).map_or(Ok(None), |raw| {
        raw.into_string().map(Some).map_err(|_| format!("{name} must be valid UTF-8"))
    })
}

/// Reads an environment variable and rejects empty values.
///
/// # Errors
///
/// Returns an error when the variable is set but empty or whitespace.
fn read_env_nonempty(name: &str) -> Result<Option<String>, String> {
    match read_env_strict(name)? {
        Some(value) if value.trim().is_empty() => Err(format!("{name} must not be empty")),
        Some(value) => Ok(Some(value)),
        None => Ok(None),
    }
}

/// Parses an absolute http(s) base URL.
///
/// # Errors
///
/// Returns an error when the value is not a URL or uses another scheme.
pub fn parse_base_url(raw: &str) -> Result<Url, String> {
    let url = Url::parse(raw.trim()).map_err(|err| format!("is not a valid URL: {err}"))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(format!("must use http or https, found {other}")),
    }
}

/// Parses a positive timeout value from an environment variable string.
///
/// # Errors
///
/// Returns an error when the value is missing, non-numeric, or zero.
fn parse_timeout_seconds(name: &str, raw: &str) -> Result<Duration, String> {
    let trimmed = raw.trim();
    let secs: u64 = trimmed
        .parse()
        .map_err(|_| format!("{name} must be a positive integer number of seconds"))?;
    if secs == 0 {
        return Err(format!("{name} must be greater than zero"));
    }
    Ok(Duration::from_secs(secs))
}

/// Parses a retry count; zero is allowed.
fn parse_retries(name: &str, raw: &str) -> Result<u32, String> {
    raw.trim().parse().map_err(|_| format!("{name} must be a non-negative integer"))
}

/// Parses a worker count; zero is rejected.
fn parse_workers(name: &str, raw: &str) -> Result<usize, String> {
    let workers: usize =
        raw.trim().parse().map_err(|_| format!("{name} must be a positive integer"))?;
    if workers == 0 {
        return Err(format!("{name} must be greater than zero"));
    }
    Ok(workers)
}

/// CI runs scenarios one at a time; locally, one per available core.
fn default_workers(ci: bool) -> usize {
    if ci {
        return 1;
    }
    std::thread::available_parallelism().map_or(1, NonZeroUsize::get)
}

/// Parses a boolean environment variable with permissive defaults.
///
/// # Errors
///
/// Returns an error when the value is not a recognized boolean literal.
fn parse_bool_env(name: &str, raw: Option<String>) -> Result<bool, String> {
    let Some(value) = raw else {
        return Ok(false);
    };
    let trimmed = value.trim();
    if trimmed.eq_ignore_ascii_case("true") || trimmed == "1" {
        return Ok(true);
    }
    if trimmed.eq_ignore_ascii_case("false") || trimmed == "0" {
        return Ok(false);
    }
    Err(format!("{name} must be 1, 0, true, or false"))
}
