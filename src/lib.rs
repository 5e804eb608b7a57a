//! starbatch: star, unstar or check GitHub repositories in rate-limit aware batches.

pub mod adapters;
pub mod app;
pub mod domain;
pub mod ports;

#[cfg(test)]
pub(crate) mod testing;

pub use app::api::{
    ConfigCheckReport, RepositoryInfo, TokenDiagnosis, check_config, diagnose, rate_limit,
    repository_info, run,
};
pub use domain::configuration::load_config;
pub use domain::{
    AppError, BatchingPolicy, ConfigOverrides, LoadedConfig, RateLimitStatus, RepositoryRef,
    RunConfig, RunMode, RunSummary,
};
