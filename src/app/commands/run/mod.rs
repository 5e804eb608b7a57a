//! The star/unstar/check run.
//!
//! `Idle -> Authenticating -> Validating -> Dispatching -> Completed`; any
//! setup failure ends the run with an error instead.

mod executor;
mod gate;
mod scheduler;

pub use executor::ActionExecutor;
pub use gate::RateLimitGate;
pub use scheduler::BatchScheduler;

use crate::domain::{AppError, RunConfig, RunSummary, validate_repositories};
use crate::ports::{RunEvent, RunReporter, Sleeper, StarClient};

pub struct RunController<'a> {
    client: &'a dyn StarClient,
    reporter: &'a dyn RunReporter,
    sleeper: &'a dyn Sleeper,
}

impl<'a> RunController<'a> {
    pub fn new(
        client: &'a dyn StarClient,
        reporter: &'a dyn RunReporter,
        sleeper: &'a dyn Sleeper,
    ) -> Self {
        Self { client, reporter, sleeper }
    }

    /// Execute one run.
    ///
    /// Errors only for setup failures: missing credential, empty repository
    /// list, rejected authentication, or no valid repository. Per-item
    /// failures and rate-limit stops end up in the returned summary.
    pub fn run(&self, config: &RunConfig) -> Result<RunSummary, AppError> {
        if !config.has_credential() {
            return Err(AppError::MissingCredential);
        }
        if config.repositories.is_empty() {
            return Err(AppError::NoRepositories);
        }

        self.reporter.report(RunEvent::Configured {
            repositories: config.repositories.len(),
            interval: config.interval,
            mode: config.mode,
        });

        let user = self
            .client
            .authenticate()
            .map_err(|e| AppError::AuthenticationFailed(e.to_string()))?;
        self.reporter.report(RunEvent::Authenticated { login: user.login.clone() });

        if let Some(configured) = &config.username
            && !configured.eq_ignore_ascii_case(&user.login)
        {
            self.reporter.report(RunEvent::UsernameMismatch {
                configured: configured.clone(),
                authenticated: user.login.clone(),
            });
        }

        let validation = validate_repositories(&config.repositories);
        for raw in validation.invalid {
            self.reporter.report(RunEvent::InvalidRepository { raw });
        }
        let repos = validation.valid;
        if repos.is_empty() {
            return Err(AppError::NoValidRepositories);
        }
        self.reporter.report(RunEvent::Validated { valid: repos.len() });

        let gate = RateLimitGate::new(self.client, self.reporter);
        let scheduler = BatchScheduler::new(
            ActionExecutor::new(self.client),
            RateLimitGate::new(self.client, self.reporter),
            self.reporter,
            self.sleeper,
            config.mode,
            config.interval,
        );
        let dispatching = RunEvent::Dispatching { mode: config.mode, count: repos.len() };

        let summary = match &config.batching {
            None => {
                self.reporter.report(dispatching);
                scheduler.run_sequential(&repos)
            }
            Some(policy) => {
                let status = gate.check_quota();
                if status.is_below(policy.min_remaining_to_start) {
                    self.reporter.report(RunEvent::RateLimitAbort {
                        status,
                        threshold: policy.min_remaining_to_start,
                    });
                    RunSummary { skipped_count: repos.len(), ..RunSummary::default() }
                } else {
                    self.reporter.report(dispatching);
                    let summary = scheduler.run_batches(&repos, policy);
                    gate.check_quota();
                    summary
                }
            }
        };

        self.reporter.report(RunEvent::Completed { mode: config.mode, summary });
        Ok(summary)
    }
}
