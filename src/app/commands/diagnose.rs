//! Token diagnosis. Read-only: no star state is touched.

use crate::domain::identifiers::validation::looks_like_github_token;
use crate::domain::{AppError, RateLimitStatus};
use crate::ports::StarClient;

const STAR_SCOPES: [&str; 2] = ["public_repo", "repo"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenDiagnosis {
    pub login: String,
    pub token_format_ok: bool,
    /// `None` for tokens whose scopes the host does not report (fine-grained tokens).
    pub scopes: Option<Vec<String>>,
    pub rate_limit: Option<RateLimitStatus>,
}

impl TokenDiagnosis {
    /// Whether the reported scopes allow starring. `None` when unknown.
    pub fn can_star(&self) -> Option<bool> {
        self.scopes
            .as_ref()
            .map(|scopes| scopes.iter().any(|scope| STAR_SCOPES.contains(&scope.as_str())))
    }
}

pub fn execute(credential: &str, client: &dyn StarClient) -> Result<TokenDiagnosis, AppError> {
    if credential.trim().is_empty() {
        return Err(AppError::MissingCredential);
    }

    let user = client.authenticate().map_err(|e| AppError::AuthenticationFailed(e.to_string()))?;
    let rate_limit = client.rate_limit().ok();

    Ok(TokenDiagnosis {
        login: user.login,
        token_format_ok: looks_like_github_token(credential.trim()),
        scopes: user.scopes,
        rate_limit,
    })
}
