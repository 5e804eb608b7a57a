pub mod batching;
pub mod configuration;
pub mod error;
pub mod identifiers;
mod outcome;
mod rate_limit;

pub use batching::partition;
pub use configuration::{
    BatchingPolicy, ConfigFile, ConfigOverrides, GitHubApiConfig, LoadedConfig, RunConfig,
    RunMode,
};
pub use error::AppError;
pub use identifiers::{RepositoryRef, RepositoryValidation, validate_repositories};
pub use outcome::{ActionOutcome, RunSummary};
pub use rate_limit::RateLimitStatus;
