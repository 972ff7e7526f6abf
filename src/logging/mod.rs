// Logging module - tracing setup and in-memory log capture
//
// In TUI mode log events go to a bounded buffer that the log strip renders,
// so nothing writes through the alternate screen. Headless commands log to
// stderr. Either mode can additionally write JSON logs to rotating files.

use crate::config::{LogRotation, LoggingConfig};
use chrono::{DateTime, Utc};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use tracing::{Level, Metadata, Subscriber};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::Context;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

/// Maximum number of log entries to keep in memory
const MAX_LOG_ENTRIES: usize = 1000;

/// A single log entry captured from tracing
#[derive(Debug, Clone)]
pub struct LogEntry {
    pub timestamp: DateTime<Utc>,
    pub level: LogLevel,
    pub target: String,
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<&Level> for LogLevel {
    fn from(level: &Level) -> Self {
        match *level {
            Level::ERROR => LogLevel::Error,
            Level::WARN => LogLevel::Warn,
            Level::INFO => LogLevel::Info,
            Level::DEBUG => LogLevel::Debug,
            Level::TRACE => LogLevel::Trace,
        }
    }
}

impl LogLevel {
    pub fn as_str(&self) -> &str {
        match self {
            LogLevel::Error => "ERROR",
            LogLevel::Warn => "WARN",
            LogLevel::Info => "INFO",
            LogLevel::Debug => "DEBUG",
            LogLevel::Trace => "TRACE",
        }
    }
}

/// In-memory log buffer with bounded size (ring buffer)
#[derive(Clone)]
pub struct LogBuffer {
    entries: Arc<Mutex<VecDeque<LogEntry>>>,
}

impl LogBuffer {
    pub fn new() -> Self {
        Self {
            entries: Arc::new(Mutex::new(VecDeque::with_capacity(MAX_LOG_ENTRIES))),
        }
    }

    /// Add a log entry, dropping the oldest one when full
    pub fn add(&self, entry: LogEntry) {
        let Ok(mut entries) = self.entries.lock() else {
            return;
        };
        if entries.len() >= MAX_LOG_ENTRIES {
            entries.pop_front();
        }
        entries.push_back(entry);
    }

    /// The newest `n` entries, oldest first
    pub fn tail(&self, n: usize) -> Vec<LogEntry> {
        let Ok(entries) = self.entries.lock() else {
            return Vec::new();
        };
        let skip = entries.len().saturating_sub(n);
        entries.iter().skip(skip).cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.entries.lock().map(|e| e.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for LogBuffer {
    fn default() -> Self {
        Self::new()
    }
}

/// Tracing layer that captures events into a [`LogBuffer`]
pub struct TuiLogLayer {
    buffer: LogBuffer,
}

impl TuiLogLayer {
    pub fn new(buffer: LogBuffer) -> Self {
        Self { buffer }
    }
}

impl<S> Layer<S> for TuiLogLayer
where
    S: Subscriber,
{
    fn on_event(&self, event: &tracing::Event<'_>, _ctx: Context<'_, S>) {
        let metadata = event.metadata();

        let mut message = String::new();
        event.record(&mut MessageVisitor(&mut message));

        self.buffer.add(LogEntry {
            timestamp: Utc::now(),
            level: LogLevel::from(metadata.level()),
            target: metadata.target().to_string(),
            message,
        });
    }

    fn enabled(&self, _metadata: &Metadata<'_>, _ctx: Context<'_, S>) -> bool {
        // Filtering happens at subscriber level
        true
    }
}

/// Visitor to extract the message (and any extra fields) from a tracing event
struct MessageVisitor<'a>(&'a mut String);

impl tracing::field::Visit for MessageVisitor<'_> {
    fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
        if field.name() == "message" {
            self.0.insert_str(0, value);
        } else {
            self.0.push_str(&format!(" {}={}", field.name(), value));
        }
    }

    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
        if field.name() == "message" {
            self.0.insert_str(0, &format!("{:?}", value));
        } else {
            self.0.push_str(&format!(" {}={:?}", field.name(), value));
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Subscriber setup
// ─────────────────────────────────────────────────────────────────────────────

/// Install the global subscriber.
///
/// Precedence for the filter: RUST_LOG env var > config file > "info".
/// With `tui` set, events are captured into `buffer`; otherwise they go to
/// stderr. The returned guard must outlive the program so file logs flush.
pub fn init(config: &LoggingConfig, tui: bool, buffer: &LogBuffer) -> Option<WorkerGuard> {
    let default_filter = format!("structview={}", config.level);
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into());

    let (file_layer, guard) = match file_writer(config) {
        Some((writer, guard)) => (
            Some(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(writer)
                    .with_ansi(false),
            ),
            Some(guard),
        ),
        None => (None, None),
    };

    let capture = tui.then(|| TuiLogLayer::new(buffer.clone()));
    let stderr = (!tui).then(|| tracing_subscriber::fmt::layer().with_writer(std::io::stderr));

    // try_init: tests and repeated calls must not panic on an existing subscriber
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(capture)
        .with(stderr)
        .with(file_layer)
        .try_init();

    guard
}

/// Non-blocking rolling file writer, if file logging is enabled and the
/// directory is usable
fn file_writer(
    config: &LoggingConfig,
) -> Option<(tracing_appender::non_blocking::NonBlocking, WorkerGuard)> {
    if !config.file_enabled {
        return None;
    }

    if let Err(e) = std::fs::create_dir_all(&config.file_dir) {
        eprintln!(
            "Warning: Could not create log directory {:?}: {}",
            config.file_dir, e
        );
        return None;
    }

    let appender = match config.file_rotation {
        LogRotation::Hourly => {
            tracing_appender::rolling::hourly(&config.file_dir, &config.file_prefix)
        }
        LogRotation::Daily => tracing_appender::rolling::daily(&config.file_dir, &config.file_prefix),
        LogRotation::Never => tracing_appender::rolling::never(&config.file_dir, &config.file_prefix),
    };

    Some(tracing_appender::non_blocking(appender))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(message: &str) -> LogEntry {
        LogEntry {
            timestamp: Utc::now(),
            level: LogLevel::Info,
            target: "structview".to_string(),
            message: message.to_string(),
        }
    }

    #[test]
    fn test_buffer_is_bounded() {
        let buffer = LogBuffer::new();
        for i in 0..(MAX_LOG_ENTRIES + 5) {
            buffer.add(entry(&format!("line {}", i)));
        }
        assert_eq!(buffer.len(), MAX_LOG_ENTRIES);

        let tail = buffer.tail(1);
        assert_eq!(tail[0].message, format!("line {}", MAX_LOG_ENTRIES + 4));
    }

    #[test]
    fn test_tail_returns_oldest_first() {
        let buffer = LogBuffer::new();
        buffer.add(entry("a"));
        buffer.add(entry("b"));
        buffer.add(entry("c"));

        let messages: Vec<_> = buffer.tail(2).into_iter().map(|e| e.message).collect();
        assert_eq!(messages, vec!["b", "c"]);
        assert_eq!(buffer.tail(10).len(), 3);
    }

    #[test]
    fn test_layer_captures_message_and_fields() {
        let buffer = LogBuffer::new();
        let subscriber = tracing_subscriber::registry().with(TuiLogLayer::new(buffer.clone()));

        tracing::subscriber::with_default(subscriber, || {
            tracing::warn!(address = "0.1", "duplicate node id");
        });

        let captured = buffer.tail(1);
        assert_eq!(captured.len(), 1);
        assert_eq!(captured[0].level, LogLevel::Warn);
        assert_eq!(captured[0].message, "duplicate node id address=0.1");
    }

    #[test]
    fn test_file_logging_disabled_yields_no_writer() {
        let config = LoggingConfig::default();
        assert!(file_writer(&config).is_none());
    }
}
