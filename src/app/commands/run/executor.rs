use crate::domain::{ActionOutcome, AppError, RepositoryRef, RunMode};
use crate::ports::StarClient;

/// Applies one mode to one repository and converts every failure into an outcome.
pub struct ActionExecutor<'a> {
    client: &'a dyn StarClient,
}

impl<'a> ActionExecutor<'a> {
    pub fn new(client: &'a dyn StarClient) -> Self {
        Self { client }
    }

    /// Never fails; star and unstar read the current state before mutating.
    pub fn execute(&self, repo: &RepositoryRef, mode: RunMode) -> ActionOutcome {
        self.try_execute(repo, mode).unwrap_or_else(classify_error)
    }

    fn try_execute(&self, repo: &RepositoryRef, mode: RunMode) -> Result<ActionOutcome, AppError> {
        let starred = self.client.is_starred(repo)?;

        let outcome = match mode {
            RunMode::Check if starred => ActionOutcome::Starred,
            RunMode::Check => ActionOutcome::NotStarred,
            RunMode::Star if starred => ActionOutcome::AlreadyInState,
            RunMode::Star => {
                self.client.star(repo)?;
                ActionOutcome::Changed
            }
            RunMode::Unstar if !starred => ActionOutcome::AlreadyInState,
            RunMode::Unstar => {
                self.client.unstar(repo)?;
                ActionOutcome::Changed
            }
        };
        Ok(outcome)
    }
}

fn classify_error(error: AppError) -> ActionOutcome {
    match error.status() {
        Some(404) => ActionOutcome::NotFound,
        Some(403 | 429) => ActionOutcome::Forbidden { message: error.to_string() },
        _ => ActionOutcome::Failed { message: error.to_string() },
    }
}
