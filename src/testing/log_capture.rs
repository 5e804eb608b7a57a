use std::io;
use std::sync::{Arc, Mutex};

use tracing::Level;

use crate::adapters::console_logging::ConsoleFormat;

#[derive(Clone, Default)]
struct Buffer(Arc<Mutex<Vec<u8>>>);

impl io::Write for Buffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Run `emit` under a thread-local subscriber and return the rendered lines.
pub fn capture_logs_with(use_color: bool, emit: impl FnOnce()) -> String {
    let buffer = Buffer::default();
    let sink = buffer.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(Level::DEBUG)
        .event_format(ConsoleFormat::new(use_color))
        .with_writer(move || sink.clone())
        .finish();
    tracing::subscriber::with_default(subscriber, emit);

    let bytes = buffer.0.lock().unwrap().clone();
    String::from_utf8(bytes).unwrap()
}

pub fn capture_logs(emit: impl FnOnce()) -> String {
    capture_logs_with(false, emit)
}
