use std::sync::{Arc, Mutex};

use crate::ports::{RunEvent, RunReporter};

#[derive(Clone, Default)]
pub struct RecordingReporter {
    events: Arc<Mutex<Vec<RunEvent>>>,
}

#[allow(dead_code)]
impl RecordingReporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<RunEvent> {
        self.events.lock().unwrap().clone()
    }

    pub fn invalid_repositories(&self) -> Vec<String> {
        self.events()
            .into_iter()
            .filter_map(|event| match event {
                RunEvent::InvalidRepository { raw } => Some(raw),
                _ => None,
            })
            .collect()
    }
}

impl RunReporter for RecordingReporter {
    fn report(&self, event: RunEvent) {
        self.events.lock().unwrap().push(event);
    }
}
