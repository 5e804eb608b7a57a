use crate::domain::{AppError, RepositoryRef};
use crate::ports::{RepositoryInfo, StarClient};

/// Look up repository metadata. A 404 becomes [`AppError::RepositoryNotFound`].
pub fn execute(client: &dyn StarClient, raw: &str) -> Result<RepositoryInfo, AppError> {
    let repo = RepositoryRef::parse(raw)?;
    client.repository(&repo).map_err(|error| match error.status() {
        Some(404) => AppError::RepositoryNotFound(repo.full_name()),
        _ => error,
    })
}
