//! GitHub starring API port definition.

use crate::domain::{AppError, RateLimitStatus, RepositoryRef};

/// Identity behind the configured token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub login: String,
    /// OAuth scopes granted to a classic token. `None` when the host does not report them.
    pub scopes: Option<Vec<String>>,
}

/// Repository metadata for the info lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryInfo {
    pub full_name: String,
    pub description: Option<String>,
    pub star_count: u64,
    pub primary_language: Option<String>,
    pub url: String,
}

/// Port for the host API operations this tool consumes.
///
/// Calls are stateless; a single client is shared read-only across a run.
pub trait StarClient {
    /// Resolve the user behind the token.
    fn authenticate(&self) -> Result<AuthenticatedUser, AppError>;

    /// Whether the authenticated user has starred `repo`.
    fn is_starred(&self, repo: &RepositoryRef) -> Result<bool, AppError>;

    fn star(&self, repo: &RepositoryRef) -> Result<(), AppError>;

    fn unstar(&self, repo: &RepositoryRef) -> Result<(), AppError>;

    /// Current core REST quota.
    fn rate_limit(&self) -> Result<RateLimitStatus, AppError>;

    fn repository(&self, repo: &RepositoryRef) -> Result<RepositoryInfo, AppError>;
}
