//! Console log output: `[YYYY-MM-DD HH:MM:SS] LEVEL message key=value`.

use std::fmt;

use chrono::Local;
use console::Style;
use tracing::{Event, Level, Metadata, Subscriber};
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::writer::MakeWriterExt;
use tracing_subscriber::fmt::{FmtContext, FormatEvent, FormatFields};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt as subscriber_fmt};

use crate::domain::AppError;

/// Target for completion events rendered with the SUCCESS label.
pub const SUCCESS_TARGET: &str = "starbatch::success";

const DEFAULT_DIRECTIVE: &str = "starbatch=info";
const VERBOSE_DIRECTIVE: &str = "starbatch=debug";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoggingConfig {
    pub verbose: bool,
    pub use_color: bool,
}

/// Install the global subscriber. Warnings and errors go to stderr, the rest to stdout.
///
/// `RUST_LOG` replaces the default directive when set.
pub fn init_logging(config: &LoggingConfig) -> Result<(), AppError> {
    let filter = make_filter(config.verbose, std::env::var(EnvFilter::DEFAULT_ENV).ok())?;
    let writer = std::io::stderr.with_max_level(Level::WARN).or_else(std::io::stdout);

    let layer = subscriber_fmt::layer()
        .event_format(ConsoleFormat::new(config.use_color))
        .with_writer(writer);

    tracing_subscriber::registry()
        .with(filter)
        .with(layer)
        .try_init()
        .map_err(|e| AppError::config_error(format!("Failed to initialize logging: {}", e)))
}

fn make_filter(verbose: bool, env_directive: Option<String>) -> Result<EnvFilter, AppError> {
    let directive = match env_directive {
        Some(value) if !value.trim().is_empty() => value,
        _ if verbose => VERBOSE_DIRECTIVE.to_string(),
        _ => DEFAULT_DIRECTIVE.to_string(),
    };
    EnvFilter::try_new(&directive)
        .map_err(|_| AppError::config_error(format!("Invalid log filter '{}'", directive)))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Label {
    Success,
    Info,
    Warn,
    Error,
    Debug,
}

impl Label {
    fn of(metadata: &Metadata<'_>) -> Self {
        match *metadata.level() {
            Level::ERROR => Label::Error,
            Level::WARN => Label::Warn,
            Level::INFO if metadata.target() == SUCCESS_TARGET => Label::Success,
            Level::INFO => Label::Info,
            _ => Label::Debug,
        }
    }

    fn text(self) -> &'static str {
        match self {
            Label::Success => "SUCCESS",
            Label::Info => "INFO",
            Label::Warn => "WARN",
            Label::Error => "ERROR",
            Label::Debug => "DEBUG",
        }
    }

    fn style(self) -> Style {
        let style = match self {
            Label::Success => Style::new().green().bold(),
            Label::Info => Style::new().blue(),
            Label::Warn => Style::new().yellow(),
            Label::Error => Style::new().red().bold(),
            Label::Debug => Style::new().dim(),
        };
        style.force_styling(true)
    }
}

/// Event formatter shared by every log line.
#[derive(Debug, Clone, Copy)]
pub struct ConsoleFormat {
    use_color: bool,
}

impl ConsoleFormat {
    pub fn new(use_color: bool) -> Self {
        Self { use_color }
    }
}

impl<S, N> FormatEvent<S, N> for ConsoleFormat
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> fmt::Result {
        let timestamp = format!("[{}]", Local::now().format("%Y-%m-%d %H:%M:%S"));
        let label = Label::of(event.metadata());

        let mut fields = String::new();
        ctx.format_fields(Writer::new(&mut fields), event)?;

        if self.use_color {
            let dim = Style::new().dim().force_styling(true);
            write!(
                writer,
                "{} {} {}",
                dim.apply_to(timestamp),
                label.style().apply_to(label.text()),
                label.style().apply_to(fields)
            )?;
        } else {
            write!(writer, "{} {} {}", timestamp, label.text(), fields)?;
        }
        writeln!(writer)
    }
}
