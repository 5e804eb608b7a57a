mod fake_star_client;
mod log_capture;
mod recording_reporter;

#[allow(unused_imports)]
pub use fake_star_client::{Call, FakeStarClient};
#[allow(unused_imports)]
pub use log_capture::{capture_logs, capture_logs_with};
#[allow(unused_imports)]
pub use recording_reporter::RecordingReporter;
