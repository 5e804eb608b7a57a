//! Sequential dispatch, optionally split into rate-limit gated batches.
//!
//! Items are processed strictly in input order. The per-item interval is
//! requested before every item except the first of the whole list, so a run
//! that stops early never ends on a pause.

use std::time::Duration;

use crate::domain::{BatchingPolicy, RepositoryRef, RunMode, RunSummary, partition};
use crate::ports::{RunEvent, RunReporter, Sleeper};

use super::executor::ActionExecutor;
use super::gate::RateLimitGate;

pub struct BatchScheduler<'a> {
    executor: ActionExecutor<'a>,
    gate: RateLimitGate<'a>,
    reporter: &'a dyn RunReporter,
    sleeper: &'a dyn Sleeper,
    mode: RunMode,
    interval: Duration,
}

impl<'a> BatchScheduler<'a> {
    pub fn new(
        executor: ActionExecutor<'a>,
        gate: RateLimitGate<'a>,
        reporter: &'a dyn RunReporter,
        sleeper: &'a dyn Sleeper,
        mode: RunMode,
        interval: Duration,
    ) -> Self {
        Self { executor, gate, reporter, sleeper, mode, interval }
    }

    /// Process every repository in order without quota checks.
    pub fn run_sequential(&self, repos: &[RepositoryRef]) -> RunSummary {
        let mut summary = RunSummary::default();
        for (index, repo) in repos.iter().enumerate() {
            self.process(repo, index == 0, &mut summary);
        }
        summary
    }

    /// Process `repos` in chunks of `policy.batch_size`.
    ///
    /// After each chunk but the last the quota is re-checked; below
    /// `policy.min_remaining_per_batch` the remaining chunks are skipped.
    pub fn run_batches(&self, repos: &[RepositoryRef], policy: &BatchingPolicy) -> RunSummary {
        let batches = partition(repos, policy.batch_size);
        let total = batches.len();
        self.reporter.report(RunEvent::BatchPlanned { repositories: repos.len(), batches: total });

        let mut summary = RunSummary::default();
        let mut processed = 0;

        for (index, batch) in batches.iter().enumerate() {
            self.reporter.report(RunEvent::BatchStarted {
                index: index + 1,
                total,
                size: batch.len(),
            });

            let mut batch_summary = RunSummary::default();
            for repo in batch.iter() {
                self.process(repo, processed == 0, &mut batch_summary);
                processed += 1;
            }
            self.reporter
                .report(RunEvent::BatchCompleted { index: index + 1, summary: batch_summary });
            summary.merge(&batch_summary);

            if index + 1 == total {
                break;
            }

            let status = self.gate.check_quota();
            if status.is_below(policy.min_remaining_per_batch) {
                let skipped = repos.len() - processed;
                summary.skipped_count += skipped;
                self.reporter.report(RunEvent::BatchStopped {
                    remaining: status.remaining,
                    threshold: policy.min_remaining_per_batch,
                    skipped,
                });
                break;
            }

            self.reporter.report(RunEvent::BatchPause { pause: policy.batch_pause });
            self.pause(policy.batch_pause);
        }

        summary
    }

    fn process(&self, repo: &RepositoryRef, first: bool, summary: &mut RunSummary) {
        if !first {
            self.pause(self.interval);
        }

        let outcome = self.executor.execute(repo, self.mode);
        summary.record(&outcome);
        self.reporter.report(RunEvent::ItemProcessed {
            repo: repo.clone(),
            mode: self.mode,
            outcome,
        });
    }

    fn pause(&self, duration: Duration) {
        if !duration.is_zero() {
            self.sleeper.sleep(duration);
        }
    }
}
