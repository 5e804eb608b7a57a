//! Run configuration loading: defaults, settings file, environment, then CLI overrides.

use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

use url::Url;

use super::run_config::{ConfigFile, DEFAULT_INTERVAL_SECS};
use super::{BatchingPolicy, RunConfig, RunMode};
use crate::domain::AppError;
use crate::domain::identifiers::split_repository_list;

pub const ENV_TOKEN: &str = "GITHUB_TOKEN";
pub const ENV_USERNAME: &str = "GITHUB_USERNAME";
pub const ENV_REPOSITORIES: &str = "REPOSITORIES";
pub const ENV_INTERVAL: &str = "STAR_INTERVAL";
pub const ENV_MODE: &str = "MODE";
pub const ENV_BATCH_SIZE: &str = "BATCH_SIZE";
pub const ENV_BATCH_PAUSE: &str = "BATCH_PAUSE_SECONDS";
pub const ENV_API_URL: &str = "GITHUB_API_URL";

/// Values supplied on the command line. `None` means "not given".
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub credential: Option<String>,
    pub username: Option<String>,
    pub repositories: Option<Vec<String>>,
    pub interval_seconds: Option<u64>,
    pub mode: Option<String>,
    pub batch: bool,
    pub batch_size: Option<usize>,
    pub batch_pause_seconds: Option<u64>,
    pub api_url: Option<String>,
}

/// A resolved configuration plus non-fatal findings made while resolving it.
#[derive(Debug, Clone)]
pub struct LoadedConfig {
    pub config: RunConfig,
    pub warnings: Vec<String>,
}

/// Load configuration from the process environment and an optional settings file.
pub fn load_config(
    path: Option<&Path>,
    overrides: &ConfigOverrides,
) -> Result<LoadedConfig, AppError> {
    let file = path.map(read_config_file).transpose()?;
    resolve_config(file, |key| std::env::var(key).ok(), overrides)
}

/// Read and parse a settings file.
pub fn read_config_file(path: &Path) -> Result<ConfigFile, AppError> {
    if !path.exists() {
        return Err(AppError::config_error(format!("Config file not found: {}", path.display())));
    }
    let content = std::fs::read_to_string(path)?;
    parse_config_content(&content)
}

/// Parse settings from string content.
pub fn parse_config_content(content: &str) -> Result<ConfigFile, AppError> {
    let file: ConfigFile = toml::from_str(content)?;
    file.github.validate()?;
    Ok(file)
}

/// Merge all sources. `env` looks up a variable by name.
pub fn resolve_config<F>(
    file: Option<ConfigFile>,
    env: F,
    overrides: &ConfigOverrides,
) -> Result<LoadedConfig, AppError>
where
    F: Fn(&str) -> Option<String>,
{
    let file = file.unwrap_or_default();
    let mut warnings = Vec::new();
    let env = |key: &str| env(key).map(|value| value.trim().to_string()).filter(|v| !v.is_empty());

    let credential = overrides.credential.clone().or_else(|| env(ENV_TOKEN)).unwrap_or_default();

    let username = overrides
        .username
        .clone()
        .or_else(|| env(ENV_USERNAME))
        .or(file.run.username)
        .filter(|name| !name.trim().is_empty());

    let repositories = overrides
        .repositories
        .clone()
        .or_else(|| env(ENV_REPOSITORIES).map(|raw| split_repository_list(&raw)))
        .or(file.run.repositories)
        .unwrap_or_default();

    let interval_seconds = match overrides.interval_seconds {
        Some(seconds) => seconds,
        None => parse_env(&env, ENV_INTERVAL, &mut warnings)
            .or(file.run.interval_seconds)
            .unwrap_or(DEFAULT_INTERVAL_SECS),
    };

    let mode = match overrides.mode.clone().or_else(|| env(ENV_MODE)).or(file.run.mode) {
        Some(raw) => RunMode::from_str(&raw)?,
        None => RunMode::default(),
    };

    let env_batch_size: Option<usize> = parse_env(&env, ENV_BATCH_SIZE, &mut warnings);
    let env_batch_pause: Option<u64> = parse_env(&env, ENV_BATCH_PAUSE, &mut warnings);
    let batching_requested = overrides.batch
        || overrides.batch_size.is_some()
        || overrides.batch_pause_seconds.is_some()
        || env_batch_size.is_some()
        || env_batch_pause.is_some()
        || file.batching.enabled.unwrap_or(false);

    let batching = if batching_requested {
        let defaults = BatchingPolicy::default();
        let policy = BatchingPolicy {
            batch_size: overrides
                .batch_size
                .or(env_batch_size)
                .or(file.batching.batch_size)
                .unwrap_or(defaults.batch_size),
            batch_pause: overrides
                .batch_pause_seconds
                .or(env_batch_pause)
                .or(file.batching.batch_pause_seconds)
                .map(Duration::from_secs)
                .unwrap_or(defaults.batch_pause),
            min_remaining_to_start: file
                .batching
                .min_remaining_to_start
                .unwrap_or(defaults.min_remaining_to_start),
            min_remaining_per_batch: file
                .batching
                .min_remaining_per_batch
                .unwrap_or(defaults.min_remaining_per_batch),
        };
        policy.validate()?;
        Some(policy)
    } else {
        None
    };

    let mut github = file.github;
    if let Some(raw) = overrides.api_url.clone().or_else(|| env(ENV_API_URL)) {
        github.api_url = Url::parse(&raw).map_err(|e| {
            AppError::config_error(format!("Invalid GitHub API URL '{}': {}", raw, e))
        })?;
    }
    github.validate()?;

    let config = RunConfig {
        credential,
        username,
        repositories,
        interval: Duration::from_secs(interval_seconds),
        mode,
        batching,
        github,
    };

    Ok(LoadedConfig { config, warnings })
}

fn parse_env<T, F>(env: &F, key: &str, warnings: &mut Vec<String>) -> Option<T>
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    let raw = env(key)?;
    match raw.parse::<T>() {
        Ok(value) => Some(value),
        Err(_) => {
            warnings.push(format!(
                "{} must be a non-negative integer (got '{}'); ignoring it",
                key, raw
            ));
            None
        }
    }
}
