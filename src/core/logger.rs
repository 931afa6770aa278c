//! Named logger implementation

use super::{
    appender::Appender,
    env_config::LoggerSettings,
    error::Result,
    log_level::LogLevel,
    log_record::LogRecord,
};
use crate::appenders::{LogStream, StreamAppender};
use parking_lot::RwLock;
use std::error::Error;
use std::fmt;
use std::panic::Location;

/// A named logger with a minimum level and its appenders.
///
/// Loggers are shared as `Arc<Logger>` through the registry, so every
/// mutator takes `&self`.
pub struct Logger {
    name: String,
    min_level: RwLock<LogLevel>,
    appenders: RwLock<Vec<Box<dyn Appender>>>,
}

impl Logger {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            min_level: RwLock::new(LogLevel::Info),
            appenders: RwLock::new(Vec::new()),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn min_level(&self) -> LogLevel {
        *self.min_level.read()
    }

    pub fn set_min_level(&self, level: LogLevel) {
        *self.min_level.write() = level;
    }

    pub fn is_enabled(&self, level: LogLevel) -> bool {
        level >= self.min_level()
    }

    pub fn add_appender(&self, appender: Box<dyn Appender>) {
        self.appenders.write().push(appender);
    }

    /// Swap out every appender at once
    pub fn replace_appenders(&self, appenders: Vec<Box<dyn Appender>>) {
        *self.appenders.write() = appenders;
    }

    pub fn appender_count(&self) -> usize {
        self.appenders.read().len()
    }

    /// Apply environment settings: one stream appender, replacing any previous ones
    ///
    /// Both updates happen under the appender lock, which `dispatch` also
    /// holds while it rechecks the threshold.
    pub(crate) fn apply(&self, settings: LoggerSettings, stream: LogStream) {
        let mut appenders = self.appenders.write();
        self.set_min_level(settings.level);
        *appenders = vec![Box::new(StreamAppender::new(settings.formatter, stream))];
    }

    #[track_caller]
    pub fn log(&self, level: LogLevel, message: impl Into<String>) {
        if !self.is_enabled(level) {
            return;
        }

        let record = LogRecord::new(level, self.name.as_str(), message).with_location(Location::caller());
        self.dispatch(&record);
    }

    /// Send a prepared record through the level filter to every appender
    pub fn log_record(&self, record: &LogRecord) {
        if self.is_enabled(record.level) {
            self.dispatch(record);
        }
    }

    /// Write to every appender with per-appender error and panic isolation.
    ///
    /// One failing appender never prevents the others from receiving the record.
    fn dispatch(&self, record: &LogRecord) {
        let mut appenders = self.appenders.write();
        if !self.is_enabled(record.level) {
            return;
        }

        for (idx, appender) in appenders.iter_mut().enumerate() {
            let append_result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
                appender.append(record)
            }));

            match append_result {
                Ok(Ok(())) => {}
                Ok(Err(e)) => {
                    eprintln!(
                        "[LODGE ERROR] Appender #{} ({}) of logger '{}' failed: {}",
                        idx,
                        appender.name(),
                        self.name,
                        e
                    );
                }
                Err(panic_info) => {
                    let panic_msg = if let Some(s) = panic_info.downcast_ref::<&str>() {
                        s.to_string()
                    } else if let Some(s) = panic_info.downcast_ref::<String>() {
                        s.clone()
                    } else {
                        "Unknown panic".to_string()
                    };
                    eprintln!(
                        "[LODGE CRITICAL] Appender #{} of logger '{}' panicked: {}. \
                         Other appenders continue to function.",
                        idx, self.name, panic_msg
                    );
                }
            }
        }
    }

    pub fn flush(&self) -> Result<()> {
        let mut appenders = self.appenders.write();
        for appender in appenders.iter_mut() {
            appender.flush()?;
        }
        Ok(())
    }

    #[inline]
    #[track_caller]
    pub fn debug(&self, message: impl Into<String>) {
        self.log(LogLevel::Debug, message);
    }

    #[inline]
    #[track_caller]
    pub fn info(&self, message: impl Into<String>) {
        self.log(LogLevel::Info, message);
    }

    #[inline]
    #[track_caller]
    pub fn warn(&self, message: impl Into<String>) {
        self.log(LogLevel::Warn, message);
    }

    #[inline]
    #[track_caller]
    pub fn error(&self, message: impl Into<String>) {
        self.log(LogLevel::Error, message);
    }

    #[inline]
    #[track_caller]
    pub fn fatal(&self, message: impl Into<String>) {
        self.log(LogLevel::Fatal, message);
    }

    /// Log at ERROR and append the error's type, message, source chain and,
    /// when `RUST_BACKTRACE` enables it, a backtrace as trailing lines.
    #[track_caller]
    pub fn exception<E>(&self, message: impl Into<String>, error: &E)
    where
        E: Error + ?Sized,
    {
        if !self.is_enabled(LogLevel::Error) {
            return;
        }

        let record = LogRecord::new(LogLevel::Error, self.name.as_str(), message)
            .with_location(Location::caller())
            .with_trace(error_trace(error));
        self.dispatch(&record);
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("name", &self.name)
            .field("min_level", &self.min_level())
            .field("appenders", &self.appender_count())
            .finish()
    }
}

/// Render an error as trace text: `Type: message`, then one `Caused by:` line per source
pub fn error_trace<E>(error: &E) -> String
where
    E: Error + ?Sized,
{
    let mut trace = format!("{}: {}", error_type_name(error), error);

    let mut source = error.source();
    while let Some(cause) = source {
        trace.push_str(&format!("\nCaused by: {}", cause));
        source = cause.source();
    }

    let backtrace = std::backtrace::Backtrace::capture();
    if backtrace.status() == std::backtrace::BacktraceStatus::Captured {
        trace.push_str(&format!("\nStack backtrace:\n{}", backtrace));
    }

    trace
}

/// Static type name, or for trait objects the leading identifier of the
/// `Debug` output, which names the concrete type or variant.
fn error_type_name<E>(error: &E) -> String
where
    E: Error + ?Sized,
{
    let static_name = std::any::type_name::<E>();
    if !static_name.starts_with("dyn ") {
        return static_name.to_string();
    }

    let debug = format!("{:?}", error);
    let head: String = debug
        .chars()
        .take_while(|c| c.is_alphanumeric() || *c == '_' || *c == ':')
        .collect();
    if head.is_empty() {
        static_name.to_string()
    } else {
        head
    }
}

/// Builder for constructing a Logger with a fluent API
///
/// # Example
/// ```
/// use lodge::prelude::*;
///
/// let logger = Logger::builder("billing")
///     .min_level(LogLevel::Debug)
///     .appender(StreamAppender::new(Formatter::text(), LogStream::stderr()))
///     .build();
/// ```
pub struct LoggerBuilder {
    name: String,
    min_level: LogLevel,
    appenders: Vec<Box<dyn Appender>>,
}

impl LoggerBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            min_level: LogLevel::Info,
            appenders: Vec::new(),
        }
    }

    /// Set minimum log level
    #[must_use = "builder methods return a new value"]
    pub fn min_level(mut self, level: LogLevel) -> Self {
        self.min_level = level;
        self
    }

    /// Add an appender
    #[must_use = "builder methods return a new value"]
    pub fn appender<A: Appender + 'static>(mut self, appender: A) -> Self {
        self.appenders.push(Box::new(appender));
        self
    }

    pub fn build(self) -> Logger {
        let logger = Logger::new(self.name);
        logger.set_min_level(self.min_level);
        logger.replace_appenders(self.appenders);
        logger
    }
}

impl Logger {
    #[must_use]
    pub fn builder(name: impl Into<String>) -> LoggerBuilder {
        LoggerBuilder::new(name)
    }
}
