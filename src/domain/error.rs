use std::io;

use thiserror::Error;

/// Library-wide error type for starbatch operations.
#[derive(Debug, Error)]
pub enum AppError {
    /// Underlying I/O failure.
    #[error(transparent)]
    Io(#[from] io::Error),

    /// Configuration or environment issue.
    #[error("{0}")]
    Configuration(String),

    /// No personal access token was supplied.
    #[error("GITHUB_TOKEN is not configured")]
    MissingCredential,

    /// No repository list was supplied.
    #[error("REPOSITORIES is not configured")]
    NoRepositories,

    /// Every configured repository failed validation.
    #[error("No valid repositories found")]
    NoValidRepositories,

    /// Mode is not one of star, unstar, check.
    #[error("Invalid mode '{0}': must be one of star, unstar, check")]
    InvalidMode(String),

    /// Repository identifier could not be parsed.
    #[error("Invalid repository '{0}': expected owner/name or a repository URL")]
    InvalidRepository(String),

    /// The host rejected the credential.
    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    /// Repository lookup returned not found.
    #[error("Repository not found: {0}")]
    RepositoryNotFound(String),

    /// GitHub REST API request failed.
    #[error("{message}")]
    GitHubApi { message: String, status: Option<u16> },

    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),
}

impl AppError {
    pub fn config_error<S: Into<String>>(message: S) -> Self {
        AppError::Configuration(message.into())
    }

    pub fn api<S: Into<String>>(message: S, status: Option<u16>) -> Self {
        AppError::GitHubApi { message: message.into(), status }
    }

    /// HTTP status carried by an API failure, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            AppError::GitHubApi { status, .. } => *status,
            _ => None,
        }
    }
}
