//! Run configuration domain models.

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use url::Url;

use super::RunMode;
use crate::domain::AppError;

pub const DEFAULT_INTERVAL_SECS: u64 = 2;
pub const DEFAULT_BATCH_SIZE: usize = 50;
pub const DEFAULT_BATCH_PAUSE_SECS: u64 = 5;
pub const DEFAULT_MIN_REMAINING_TO_START: u64 = 100;
pub const DEFAULT_MIN_REMAINING_PER_BATCH: u64 = 50;

/// Settings file passed with `--config`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    /// Run settings.
    #[serde(default)]
    pub run: RunSection,
    /// Batch scheduling settings.
    #[serde(default)]
    pub batching: BatchingSection,
    /// GitHub API settings.
    #[serde(default)]
    pub github: GitHubApiConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RunSection {
    #[serde(default)]
    pub repositories: Option<Vec<String>>,
    #[serde(default)]
    pub interval_seconds: Option<u64>,
    #[serde(default)]
    pub mode: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BatchingSection {
    #[serde(default)]
    pub enabled: Option<bool>,
    #[serde(default)]
    pub batch_size: Option<usize>,
    #[serde(default)]
    pub batch_pause_seconds: Option<u64>,
    #[serde(default)]
    pub min_remaining_to_start: Option<u64>,
    #[serde(default)]
    pub min_remaining_per_batch: Option<u64>,
}

/// GitHub API configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GitHubApiConfig {
    /// REST API base URL.
    #[serde(default = "default_api_url")]
    pub api_url: Url,
    /// Request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
    /// Maximum attempts per call, including the first.
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
    /// Base backoff delay in milliseconds.
    #[serde(default = "default_retry_delay_ms")]
    pub retry_delay_ms: u64,
}

impl Default for GitHubApiConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            timeout_secs: default_timeout(),
            max_retries: default_max_retries(),
            retry_delay_ms: default_retry_delay_ms(),
        }
    }
}

impl GitHubApiConfig {
    pub fn validate(&self) -> Result<(), AppError> {
        if self.timeout_secs == 0 {
            return Err(AppError::config_error("timeout_secs must be greater than 0"));
        }
        if self.max_retries == 0 {
            return Err(AppError::config_error("max_retries must be greater than 0"));
        }
        if self.retry_delay_ms == 0 {
            return Err(AppError::config_error("retry_delay_ms must be greater than 0"));
        }
        if self.api_url.cannot_be_a_base() {
            return Err(AppError::config_error(format!(
                "api_url cannot be used as a base URL: {}",
                self.api_url
            )));
        }
        Ok(())
    }
}

fn default_api_url() -> Url {
    Url::parse("https://api.github.com").expect("Default API URL must be valid")
}

fn default_timeout() -> u64 {
    30
}

fn default_max_retries() -> u32 {
    3
}

fn default_retry_delay_ms() -> u64 {
    1000
}

/// Batch size and rate-limit thresholds for the batched run variant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchingPolicy {
    pub batch_size: usize,
    /// Pause between consecutive batches.
    pub batch_pause: Duration,
    /// Abort before the first batch when remaining quota is below this.
    pub min_remaining_to_start: u64,
    /// Stop before a further batch when remaining quota is below this.
    pub min_remaining_per_batch: u64,
}

impl Default for BatchingPolicy {
    fn default() -> Self {
        Self {
            batch_size: DEFAULT_BATCH_SIZE,
            batch_pause: Duration::from_secs(DEFAULT_BATCH_PAUSE_SECS),
            min_remaining_to_start: DEFAULT_MIN_REMAINING_TO_START,
            min_remaining_per_batch: DEFAULT_MIN_REMAINING_PER_BATCH,
        }
    }
}

impl BatchingPolicy {
    pub fn validate(&self) -> Result<(), AppError> {
        if self.batch_size == 0 {
            return Err(AppError::config_error("batch_size must be greater than 0"));
        }
        Ok(())
    }
}

/// Resolved settings for one run. Read-only once built.
#[derive(Clone)]
pub struct RunConfig {
    /// Personal access token.
    pub credential: String,
    /// Expected login, used only for a mismatch warning.
    pub username: Option<String>,
    /// Raw repository entries in configured order.
    pub repositories: Vec<String>,
    /// Pause after each processed repository.
    pub interval: Duration,
    pub mode: RunMode,
    /// Present when the batched, rate-limit-aware variant is requested.
    pub batching: Option<BatchingPolicy>,
    pub github: GitHubApiConfig,
}

impl RunConfig {
    pub fn new(credential: impl Into<String>, repositories: Vec<String>) -> Self {
        Self {
            credential: credential.into(),
            username: None,
            repositories,
            interval: Duration::from_secs(DEFAULT_INTERVAL_SECS),
            mode: RunMode::default(),
            batching: None,
            github: GitHubApiConfig::default(),
        }
    }

    pub fn with_mode(mut self, mode: RunMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    pub fn with_batching(mut self, policy: BatchingPolicy) -> Self {
        self.batching = Some(policy);
        self
    }

    pub fn with_username(mut self, username: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self
    }

    pub fn has_credential(&self) -> bool {
        !self.credential.trim().is_empty()
    }
}

impl fmt::Debug for RunConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RunConfig")
            .field("credential", &"[REDACTED]")
            .field("username", &self.username)
            .field("repositories", &self.repositories)
            .field("interval", &self.interval)
            .field("mode", &self.mode)
            .field("batching", &self.batching)
            .field("github", &self.github)
            .finish()
    }
}
