use crate::adapters::console_logging::SUCCESS_TARGET;
use crate::domain::{ActionOutcome, RunMode, RunSummary};
use crate::ports::{RunEvent, RunReporter};

/// Reporter that renders run events as tracing events.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingReporter;

impl TracingReporter {
    pub fn new() -> Self {
        Self
    }
}

impl RunReporter for TracingReporter {
    fn report(&self, event: RunEvent) {
        match event {
            RunEvent::Configured { repositories, interval, mode } => {
                tracing::info!(
                    repositories,
                    interval_secs = interval.as_secs(),
                    mode = %mode,
                    "Configuration loaded"
                );
            }

            RunEvent::Authenticated { login } => {
                tracing::info!(target: SUCCESS_TARGET, "Authenticated as {}", login);
            }

            RunEvent::UsernameMismatch { configured, authenticated } => {
                tracing::warn!(
                    configured = %configured,
                    authenticated = %authenticated,
                    "Configured username does not match the token owner"
                );
            }

            RunEvent::InvalidRepository { raw } => {
                tracing::warn!("Invalid repository format: '{}'", raw);
            }

            RunEvent::Validated { valid } => {
                tracing::info!(valid, "Validated repositories");
            }

            RunEvent::Dispatching { mode, count } => {
                tracing::info!(count, mode = %mode, "Processing repositories");
            }

            RunEvent::ItemProcessed { repo, mode, outcome } => {
                report_item(&repo.full_name(), mode, &outcome);
            }

            RunEvent::RateLimit { status } => {
                tracing::info!(
                    remaining = status.remaining,
                    limit = status.limit,
                    reset = %status.reset_display(),
                    "Rate limit"
                );
            }

            RunEvent::RateLimitUnavailable { message } => {
                tracing::warn!(
                    error = %message,
                    "Could not query rate limit; assuming it is exhausted"
                );
            }

            RunEvent::RateLimitAbort { status, threshold } => {
                tracing::warn!(
                    remaining = status.remaining,
                    threshold,
                    reset = %status.reset_display(),
                    "Rate limit too low to start; no repositories processed"
                );
            }

            RunEvent::BatchPlanned { repositories, batches } => {
                tracing::info!(repositories, batches, "Batch plan");
            }

            RunEvent::BatchStarted { index, total, size } => {
                tracing::info!(size, "Batch {}/{}", index, total);
            }

            RunEvent::BatchCompleted { index, summary } => {
                tracing::info!(
                    success = summary.success_count,
                    errors = summary.error_count,
                    starred = summary.starred_count,
                    not_starred = summary.not_starred_count,
                    "Batch {} finished",
                    index
                );
            }

            RunEvent::BatchStopped { remaining, threshold, skipped } => {
                tracing::warn!(
                    remaining,
                    threshold,
                    skipped,
                    "Rate limit too low to continue; stopping before the next batch"
                );
            }

            RunEvent::BatchPause { pause } => {
                tracing::info!(pause_secs = pause.as_secs(), "Pausing between batches");
            }

            RunEvent::Completed { mode, summary } => report_summary(mode, &summary),
        }
    }
}

fn report_item(repo: &str, mode: RunMode, outcome: &ActionOutcome) {
    match (outcome, mode) {
        (ActionOutcome::Changed, RunMode::Unstar) => {
            tracing::info!(target: SUCCESS_TARGET, "Unstarred {}", repo);
        }
        (ActionOutcome::Changed, _) => {
            tracing::info!(target: SUCCESS_TARGET, "Starred {}", repo);
        }
        (ActionOutcome::AlreadyInState, RunMode::Unstar) => {
            tracing::info!("{} is not starred; nothing to remove", repo);
        }
        (ActionOutcome::AlreadyInState, _) => {
            tracing::info!("{} is already starred", repo);
        }
        (ActionOutcome::Starred, _) => tracing::info!("{} is starred", repo),
        (ActionOutcome::NotStarred, _) => tracing::info!("{} is not starred", repo),
        (ActionOutcome::NotFound, _) => tracing::error!("Repository not found: {}", repo),
        (ActionOutcome::Forbidden { message }, _) => {
            tracing::error!(error = %message, "Permission denied or rate limited for {}", repo);
        }
        (ActionOutcome::Failed { message }, _) => {
            tracing::error!(error = %message, "Failed to {} {}", mode, repo);
        }
    }
}

fn report_summary(mode: RunMode, summary: &RunSummary) {
    match mode {
        RunMode::Check => tracing::info!(
            target: SUCCESS_TARGET,
            starred = summary.starred_count,
            not_starred = summary.not_starred_count,
            errors = summary.error_count,
            "Check complete"
        ),
        RunMode::Star | RunMode::Unstar => tracing::info!(
            target: SUCCESS_TARGET,
            mode = %mode,
            success = summary.success_count,
            errors = summary.error_count,
            "Run complete"
        ),
    }

    if summary.skipped_count > 0 {
        tracing::warn!(skipped = summary.skipped_count, "Repositories left unprocessed");
    }
}
