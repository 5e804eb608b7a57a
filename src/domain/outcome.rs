use std::fmt;

/// Result of applying the configured action to one repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionOutcome {
    /// Already starred (star mode) or already not starred (unstar mode); no mutating call made.
    AlreadyInState,
    /// The star was added or removed.
    Changed,
    /// Check mode: currently starred.
    Starred,
    /// Check mode: currently not starred.
    NotStarred,
    /// The host answered 404.
    NotFound,
    /// The host answered 403 or 429 (permissions or quota).
    Forbidden { message: String },
    /// Any other failure.
    Failed { message: String },
}

impl ActionOutcome {
    pub fn is_error(&self) -> bool {
        matches!(
            self,
            ActionOutcome::NotFound | ActionOutcome::Forbidden { .. } | ActionOutcome::Failed { .. }
        )
    }
}

impl fmt::Display for ActionOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActionOutcome::AlreadyInState => f.write_str("already in requested state"),
            ActionOutcome::Changed => f.write_str("changed"),
            ActionOutcome::Starred => f.write_str("starred"),
            ActionOutcome::NotStarred => f.write_str("not starred"),
            ActionOutcome::NotFound => f.write_str("repository not found"),
            ActionOutcome::Forbidden { message } => {
                write!(f, "forbidden or rate limited: {}", message)
            }
            ActionOutcome::Failed { message } => write!(f, "error: {}", message),
        }
    }
}

/// Counters accumulated over one run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub success_count: usize,
    pub error_count: usize,
    pub starred_count: usize,
    pub not_starred_count: usize,
    /// Valid repositories never attempted because the rate-limit gate stopped the run.
    pub skipped_count: usize,
}

impl RunSummary {
    pub fn record(&mut self, outcome: &ActionOutcome) {
        if outcome.is_error() {
            self.error_count += 1;
            return;
        }
        match outcome {
            ActionOutcome::Changed => self.success_count += 1,
            ActionOutcome::Starred => self.starred_count += 1,
            ActionOutcome::NotStarred => self.not_starred_count += 1,
            _ => {}
        }
    }

    pub fn merge(&mut self, other: &RunSummary) {
        self.success_count += other.success_count;
        self.error_count += other.error_count;
        self.starred_count += other.starred_count;
        self.not_starred_count += other.not_starred_count;
        self.skipped_count += other.skipped_count;
    }
}
