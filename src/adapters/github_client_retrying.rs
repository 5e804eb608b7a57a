//! Retry wrapper for GitHub API client operations.

use std::thread;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use crate::domain::{AppError, GitHubApiConfig, RateLimitStatus, RepositoryRef};
use crate::ports::{AuthenticatedUser, RepositoryInfo, StarClient};

const DEFAULT_MAX_DELAY_MS: u64 = 30_000;
const RETRY_AFTER_TOKEN: &str = "retry_after_ms=";
const MAX_LOG_ERROR_CHARS: usize = 512;

#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    max_attempts: u32,
    base_delay_ms: u64,
    max_delay_ms: u64,
}

impl RetryPolicy {
    pub fn from_config(config: &GitHubApiConfig) -> Self {
        Self {
            max_attempts: config.max_retries.max(1),
            base_delay_ms: config.retry_delay_ms.max(1),
            max_delay_ms: DEFAULT_MAX_DELAY_MS.max(config.retry_delay_ms),
        }
    }

    fn delay_for_retry(&self, failed_attempt: u32, error: &AppError) -> Duration {
        if let Some(retry_after_ms) = extract_retry_after_ms(error) {
            return Duration::from_millis(retry_after_ms.min(self.max_delay_ms));
        }

        // attempt=1 -> base, attempt=2 -> base*2, attempt=3 -> base*4, capped.
        let exponent = failed_attempt.saturating_sub(1).min(6);
        let multiplier = 1_u64 << exponent;
        let backoff_ms = self.base_delay_ms.saturating_mul(multiplier).min(self.max_delay_ms);
        let jitter_ms = compute_jitter_ms(backoff_ms);
        Duration::from_millis(backoff_ms.saturating_add(jitter_ms).min(self.max_delay_ms))
    }
}

/// Retries transient failures (5xx, 408, transport errors) of the wrapped client.
///
/// 403, 404, 429 and other 4xx answers are returned immediately so the
/// executor can classify them.
pub struct RetryingStarClient {
    inner: Box<dyn StarClient>,
    policy: RetryPolicy,
}

impl RetryingStarClient {
    pub fn new(inner: Box<dyn StarClient>, policy: RetryPolicy) -> Self {
        Self { inner, policy }
    }

    fn with_retries<T>(
        &self,
        operation: &str,
        mut call: impl FnMut(&dyn StarClient) -> Result<T, AppError>,
    ) -> Result<T, AppError> {
        let mut last_error: Option<AppError> = None;

        for attempt in 1..=self.policy.max_attempts {
            match call(self.inner.as_ref()) {
                Ok(value) => return Ok(value),
                Err(error) => {
                    let retryable = is_retryable_error(&error);
                    let last_attempt = attempt == self.policy.max_attempts;

                    if !retryable || last_attempt {
                        return Err(error);
                    }

                    let delay = self.policy.delay_for_retry(attempt, &error);
                    tracing::warn!(
                        operation,
                        attempt,
                        max_attempts = self.policy.max_attempts,
                        delay_ms = delay.as_millis() as u64,
                        "GitHub request failed: {}. Retrying.",
                        format_error_for_log(&error)
                    );
                    last_error = Some(error);
                    thread::sleep(delay);
                }
            }
        }

        Err(last_error
            .unwrap_or_else(|| AppError::api("GitHub request failed after retries", None)))
    }
}

impl StarClient for RetryingStarClient {
    fn authenticate(&self) -> Result<AuthenticatedUser, AppError> {
        self.with_retries("authenticate", |client| client.authenticate())
    }

    fn is_starred(&self, repo: &RepositoryRef) -> Result<bool, AppError> {
        self.with_retries("is_starred", |client| client.is_starred(repo))
    }

    fn star(&self, repo: &RepositoryRef) -> Result<(), AppError> {
        self.with_retries("star", |client| client.star(repo))
    }

    fn unstar(&self, repo: &RepositoryRef) -> Result<(), AppError> {
        self.with_retries("unstar", |client| client.unstar(repo))
    }

    fn rate_limit(&self) -> Result<RateLimitStatus, AppError> {
        self.with_retries("rate_limit", |client| client.rate_limit())
    }

    fn repository(&self, repo: &RepositoryRef) -> Result<RepositoryInfo, AppError> {
        self.with_retries("repository", |client| client.repository(repo))
    }
}

fn is_retryable_error(error: &AppError) -> bool {
    match error {
        AppError::GitHubApi { status: Some(code), .. } => *code == 408 || *code >= 500,
        AppError::GitHubApi { message, status: None } => {
            let lower = message.to_ascii_lowercase();
            lower.contains("timeout")
                || lower.contains("timed out")
                || lower.contains("connect")
                || lower.contains("connection")
                || lower.contains("temporary")
                || lower.contains("http request failed")
        }
        _ => false,
    }
}

fn extract_retry_after_ms(error: &AppError) -> Option<u64> {
    let message = match error {
        AppError::GitHubApi { message, .. } => message,
        _ => return None,
    };

    let start = message.find(RETRY_AFTER_TOKEN)? + RETRY_AFTER_TOKEN.len();
    let tail = &message[start..];
    let digits: String = tail.chars().take_while(|ch| ch.is_ascii_digit()).collect();
    if digits.is_empty() {
        return None;
    }
    digits.parse::<u64>().ok()
}

fn compute_jitter_ms(backoff_ms: u64) -> u64 {
    let jitter_cap = backoff_ms / 4; // 25% jitter upper bound
    if jitter_cap == 0 {
        return 0;
    }

    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|duration| duration.subsec_nanos() as u64)
        .unwrap_or(0);

    nanos % jitter_cap
}

fn format_error_for_log(error: &AppError) -> String {
    let sanitized = sanitize_and_truncate_for_log(&error.to_string());
    match error.status() {
        Some(code) => format!("status={}: {}", code, sanitized),
        None => sanitized,
    }
}

fn sanitize_and_truncate_for_log(input: &str) -> String {
    let mut output = String::new();

    for (count, ch) in input.chars().enumerate() {
        if count >= MAX_LOG_ERROR_CHARS {
            break;
        }
        output.push(if ch.is_control() { ' ' } else { ch });
    }

    let mut compact = output.split_whitespace().collect::<Vec<_>>().join(" ");
    if input.chars().count() > MAX_LOG_ERROR_CHARS {
        compact.push_str(" [truncated]");
    }
    compact.trim().to_string()
}
