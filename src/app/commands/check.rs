//! Configuration check: offline validation plus a live authentication probe.

use crate::domain::identifiers::validation::looks_like_github_token;
use crate::domain::{AppError, LoadedConfig, RateLimitStatus, RepositoryRef, validate_repositories};
use crate::ports::StarClient;

#[derive(Debug, Clone)]
pub struct ConfigCheckReport {
    pub token_format_ok: bool,
    pub valid_repositories: Vec<RepositoryRef>,
    pub invalid_repositories: Vec<String>,
    pub login: String,
    /// `None` when the quota query failed; the check still passes.
    pub rate_limit: Option<RateLimitStatus>,
    pub warnings: Vec<String>,
}

pub fn execute(
    loaded: &LoadedConfig,
    client: &dyn StarClient,
) -> Result<ConfigCheckReport, AppError> {
    let config = &loaded.config;
    if !config.has_credential() {
        return Err(AppError::MissingCredential);
    }
    if config.repositories.is_empty() {
        return Err(AppError::NoRepositories);
    }

    let mut warnings = loaded.warnings.clone();
    let token_format_ok = looks_like_github_token(config.credential.trim());
    if !token_format_ok {
        warnings.push("GITHUB_TOKEN does not look like a GitHub token".to_string());
    }

    let validation = validate_repositories(&config.repositories);
    if validation.valid.is_empty() {
        return Err(AppError::NoValidRepositories);
    }

    let user = client.authenticate().map_err(|e| AppError::AuthenticationFailed(e.to_string()))?;

    let rate_limit = match client.rate_limit() {
        Ok(status) => Some(status),
        Err(error) => {
            warnings.push(format!("Could not query rate limit: {}", error));
            None
        }
    };

    Ok(ConfigCheckReport {
        token_format_ok,
        valid_repositories: validation.valid,
        invalid_repositories: validation.invalid,
        login: user.login,
        rate_limit,
        warnings,
    })
}
