use crate::domain::{AppError, RateLimitStatus};
use crate::ports::StarClient;

/// Current quota. Unlike the run gate this propagates query failures.
pub fn execute(client: &dyn StarClient) -> Result<RateLimitStatus, AppError> {
    client.rate_limit()
}
