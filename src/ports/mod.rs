mod run_reporter;
mod sleeper;
mod star_client;

pub use run_reporter::{RunEvent, RunReporter};
pub use sleeper::Sleeper;
pub use star_client::{AuthenticatedUser, RepositoryInfo, StarClient};
