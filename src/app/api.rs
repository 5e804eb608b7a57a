//! API Facade for the application.
//!
//! Each function wires the production adapters (HTTP client with retries,
//! tracing reporter, thread sleeper) to one command.

use crate::adapters::{
    HttpStarClient, RetryPolicy, RetryingStarClient, ThreadSleeper, TracingReporter,
};
use crate::app::commands::{check, diagnose, info, limits, run::RunController};
use crate::domain::{AppError, LoadedConfig, RateLimitStatus, RunConfig, RunSummary};

pub use crate::app::commands::check::ConfigCheckReport;
pub use crate::app::commands::diagnose::TokenDiagnosis;
pub use crate::ports::RepositoryInfo;

fn create_client(config: &RunConfig) -> Result<RetryingStarClient, AppError> {
    let http = HttpStarClient::new(config.credential.trim(), &config.github)?;
    Ok(RetryingStarClient::new(Box::new(http), RetryPolicy::from_config(&config.github)))
}

fn require_credential(config: &RunConfig) -> Result<(), AppError> {
    if config.has_credential() { Ok(()) } else { Err(AppError::MissingCredential) }
}

/// Star, unstar or check every configured repository.
pub fn run(config: &RunConfig) -> Result<RunSummary, AppError> {
    let client = create_client(config)?;
    let reporter = TracingReporter::new();
    RunController::new(&client, &reporter, &ThreadSleeper).run(config)
}

/// Validate the configuration and probe authentication.
pub fn check_config(loaded: &LoadedConfig) -> Result<ConfigCheckReport, AppError> {
    require_credential(&loaded.config)?;
    let client = create_client(&loaded.config)?;
    check::execute(loaded, &client)
}

/// Fetch metadata for one repository.
pub fn repository_info(config: &RunConfig, repository: &str) -> Result<RepositoryInfo, AppError> {
    require_credential(config)?;
    let client = create_client(config)?;
    info::execute(&client, repository)
}

/// Fetch the current core quota.
pub fn rate_limit(config: &RunConfig) -> Result<RateLimitStatus, AppError> {
    require_credential(config)?;
    let client = create_client(config)?;
    limits::execute(&client)
}

/// Report the token owner and scopes.
pub fn diagnose(config: &RunConfig) -> Result<TokenDiagnosis, AppError> {
    require_credential(config)?;
    let client = create_client(config)?;
    diagnose::execute(&config.credential, &client)
}
