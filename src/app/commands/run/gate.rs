use chrono::Utc;

use crate::domain::RateLimitStatus;
use crate::ports::{RunEvent, RunReporter, StarClient};

/// Quota checks ahead of and between batches.
pub struct RateLimitGate<'a> {
    client: &'a dyn StarClient,
    reporter: &'a dyn RunReporter,
}

impl<'a> RateLimitGate<'a> {
    pub fn new(client: &'a dyn StarClient, reporter: &'a dyn RunReporter) -> Self {
        Self { client, reporter }
    }

    /// Query the quota. Fails open: a failed query yields [`RateLimitStatus::conservative`].
    pub fn check_quota(&self) -> RateLimitStatus {
        match self.client.rate_limit() {
            Ok(status) => {
                self.reporter.report(RunEvent::RateLimit { status });
                status
            }
            Err(error) => {
                self.reporter.report(RunEvent::RateLimitUnavailable { message: error.to_string() });
                RateLimitStatus::conservative(Utc::now())
            }
        }
    }
}
