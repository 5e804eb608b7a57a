use std::time::Duration;

/// Port for the run's suspension points (per-item interval, inter-batch pause).
pub trait Sleeper {
    fn sleep(&self, duration: Duration);
}
