//! Log record structure

use super::log_level::LogLevel;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::panic::Location;

// Thread-local caches for thread information to avoid repeated allocations
thread_local! {
    static THREAD_ID_CACHE: RefCell<Option<String>> = const { RefCell::new(None) };
    static THREAD_NAME_CACHE: RefCell<Option<Option<String>>> = const { RefCell::new(None) };
}

fn get_thread_id() -> String {
    THREAD_ID_CACHE.with(|cache| {
        cache
            .borrow_mut()
            .get_or_insert_with(|| format!("{:?}", std::thread::current().id()))
            .clone()
    })
}

fn get_thread_name() -> Option<String> {
    THREAD_NAME_CACHE.with(|cache| {
        cache
            .borrow_mut()
            .get_or_insert_with(|| std::thread::current().name().map(String::from))
            .clone()
    })
}

/// A single log event, as handed to appenders
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogRecord {
    pub level: LogLevel,
    pub message: String,
    pub logger_name: String,
    pub timestamp: DateTime<Utc>,
    pub file: Option<String>,
    pub line: Option<u32>,
    pub thread_id: String,
    pub thread_name: Option<String>,
    /// Trailing text printed after the formatted record, e.g. an error chain
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trace: Option<String>,
}

impl LogRecord {
    pub fn new(level: LogLevel, logger_name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
            logger_name: logger_name.into(),
            timestamp: Utc::now(),
            file: None,
            line: None,
            thread_id: get_thread_id(),
            thread_name: get_thread_name(),
            trace: None,
        }
    }

    pub fn with_location(mut self, location: &Location<'_>) -> Self {
        self.file = Some(location.file().to_string());
        self.line = Some(location.line());
        self
    }

    pub fn with_trace(mut self, trace: impl Into<String>) -> Self {
        self.trace = Some(trace.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_captures_location() {
        let record = LogRecord::new(LogLevel::Info, "app", "hello").with_location(Location::caller());
        assert_eq!(record.file.as_deref(), Some(file!()));
        assert!(record.line.is_some());
        assert_eq!(record.logger_name, "app");
    }

    #[test]
    fn test_thread_info_is_cached_per_thread() {
        let a = LogRecord::new(LogLevel::Info, "app", "a");
        let b = LogRecord::new(LogLevel::Info, "app", "b");
        assert_eq!(a.thread_id, b.thread_id);

        let other = std::thread::Builder::new()
            .name("worker".into())
            .spawn(|| LogRecord::new(LogLevel::Info, "app", "c"))
            .unwrap()
            .join()
            .unwrap();
        assert_ne!(other.thread_id, a.thread_id);
        assert_eq!(other.thread_name.as_deref(), Some("worker"));
    }
}
