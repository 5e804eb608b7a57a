use chrono::{DateTime, Local, TimeZone, Utc};

/// Seconds added to "now" for the reset time of a conservative status.
const CONSERVATIVE_RESET_SECS: i64 = 3600;

/// Snapshot of the core REST quota. Never cached beyond a single check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitStatus {
    pub remaining: u64,
    pub limit: u64,
    pub reset_epoch_seconds: i64,
}

impl RateLimitStatus {
    /// Status to assume when the quota cannot be queried: treat it as exhausted.
    pub fn conservative(now: DateTime<Utc>) -> Self {
        Self {
            remaining: 0,
            limit: 0,
            reset_epoch_seconds: now.timestamp() + CONSERVATIVE_RESET_SECS,
        }
    }

    pub fn is_below(&self, threshold: u64) -> bool {
        self.remaining < threshold
    }

    /// Reset time in the local timezone, when representable.
    pub fn reset_at(&self) -> Option<DateTime<Local>> {
        Local.timestamp_opt(self.reset_epoch_seconds, 0).single()
    }

    /// Human-readable reset time.
    pub fn reset_display(&self) -> String {
        match self.reset_at() {
            Some(at) => at.format("%Y-%m-%d %H:%M:%S").to_string(),
            None => format!("epoch {}", self.reset_epoch_seconds),
        }
    }
}
