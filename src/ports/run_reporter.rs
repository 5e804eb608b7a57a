//! Logging collaborator for the run controller.

use std::time::Duration;

use crate::domain::{ActionOutcome, RateLimitStatus, RepositoryRef, RunMode, RunSummary};

/// Progress events emitted during a run, in emission order.
#[derive(Debug, Clone, PartialEq)]
pub enum RunEvent {
    Configured { repositories: usize, interval: Duration, mode: RunMode },
    Authenticated { login: String },
    UsernameMismatch { configured: String, authenticated: String },
    InvalidRepository { raw: String },
    Validated { valid: usize },
    Dispatching { mode: RunMode, count: usize },
    ItemProcessed { repo: RepositoryRef, mode: RunMode, outcome: ActionOutcome },
    RateLimit { status: RateLimitStatus },
    /// The quota query failed; a conservative status is assumed.
    RateLimitUnavailable { message: String },
    /// Pre-flight quota too low; nothing is processed.
    RateLimitAbort { status: RateLimitStatus, threshold: u64 },
    BatchPlanned { repositories: usize, batches: usize },
    BatchStarted { index: usize, total: usize, size: usize },
    BatchCompleted { index: usize, summary: RunSummary },
    /// Per-batch quota too low; remaining batches are skipped.
    BatchStopped { remaining: u64, threshold: u64, skipped: usize },
    BatchPause { pause: Duration },
    Completed { mode: RunMode, summary: RunSummary },
}

/// Port for reporting run progress.
pub trait RunReporter {
    fn report(&self, event: RunEvent);
}
