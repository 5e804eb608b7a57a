pub mod console_logging;
pub mod github_client_http;
pub mod github_client_retrying;
pub mod thread_sleeper;
pub mod tracing_reporter;

pub use console_logging::{LoggingConfig, init_logging};
pub use github_client_http::HttpStarClient;
pub use github_client_retrying::{RetryPolicy, RetryingStarClient};
pub use thread_sleeper::ThreadSleeper;
pub use tracing_reporter::TracingReporter;
