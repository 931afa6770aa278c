//! Logging macros for ergonomic log message formatting.
//!
//! The level macros bind the calling module with `module_path!()`, so call
//! sites never name a logger. The first call from a module creates its logger
//! from the environment; later calls reuse it.
//!
//! # Examples
//!
//! ```
//! use lodge::{info, warn};
//!
//! // Logged by the logger named after this module
//! info!("Server started");
//!
//! let port = 8080;
//! warn!("Port {} is already in use, retrying", port);
//! ```

/// Log a message on an explicit logger with automatic formatting.
///
/// # Examples
///
/// ```
/// # use lodge::prelude::*;
/// # let logger = Logger::new("app");
/// use lodge::log;
/// log!(logger, LogLevel::Info, "Simple message");
/// log!(logger, LogLevel::Error, "Error code: {}", 500);
/// ```
#[macro_export]
macro_rules! log {
    ($logger:expr, $level:expr, $($arg:tt)+) => {
        $logger.log($level, format!($($arg)+))
    };
}

/// A [`ProxyLogger`](crate::ProxyLogger) bound to the calling module.
///
/// # Examples
///
/// ```
/// static LOG: lodge::ProxyLogger = lodge::module_logger!();
///
/// LOG.info("Cache warmed");
/// ```
#[macro_export]
macro_rules! module_logger {
    () => {
        $crate::ProxyLogger::for_module(module_path!())
    };
}

/// Log a debug-level message from the calling module.
///
/// # Examples
///
/// ```
/// use lodge::debug;
/// debug!("Counter value: {}", 10);
/// ```
#[macro_export]
macro_rules! debug {
    ($($arg:tt)+) => {
        $crate::module_logger!().debug(format!($($arg)+))
    };
}

/// Log an info-level message from the calling module.
///
/// # Examples
///
/// ```
/// use lodge::info;
/// info!("Processing {} items", 100);
/// ```
#[macro_export]
macro_rules! info {
    ($($arg:tt)+) => {
        $crate::module_logger!().info(format!($($arg)+))
    };
}

/// Log a warning-level message from the calling module.
///
/// # Examples
///
/// ```
/// use lodge::warn;
/// warn!("Retry attempt {} of {}", 3, 5);
/// ```
#[macro_export]
macro_rules! warn {
    ($($arg:tt)+) => {
        $crate::module_logger!().warn(format!($($arg)+))
    };
}

/// Log an error-level message from the calling module.
///
/// # Examples
///
/// ```
/// use lodge::error;
/// error!("Error code: {}, message: {}", 500, "Internal error");
/// ```
#[macro_export]
macro_rules! error {
    ($($arg:tt)+) => {
        $crate::module_logger!().error(format!($($arg)+))
    };
}

/// Log a fatal-level message from the calling module.
///
/// # Examples
///
/// ```
/// use lodge::fatal;
/// fatal!("Unable to recover from error: {}", "disk full");
/// ```
#[macro_export]
macro_rules! fatal {
    ($($arg:tt)+) => {
        $crate::module_logger!().fatal(format!($($arg)+))
    };
}

/// Log an error together with its trace text from the calling module.
///
/// # Examples
///
/// ```
/// use lodge::exception;
///
/// if let Err(err) = "x".parse::<u32>() {
///     exception!(err, "Could not parse port {:?}", "x");
/// }
/// ```
#[macro_export]
macro_rules! exception {
    ($err:expr, $($arg:tt)+) => {
        $crate::module_logger!().exception(format!($($arg)+), &$err)
    };
}

#[cfg(test)]
mod tests {
    use crate::appenders::{MemoryStream, StreamAppender};
    use crate::core::{Formatter, LogLevel, Logger};

    fn text_logger() -> (Logger, MemoryStream) {
        let memory = MemoryStream::new();
        let logger = Logger::builder("macros")
            .min_level(LogLevel::Debug)
            .appender(StreamAppender::new(Formatter::text(), memory.clone().into()))
            .build();
        (logger, memory)
    }

    #[test]
    fn test_log_macro() {
        let (logger, memory) = text_logger();
        log!(logger, LogLevel::Info, "Test message");
        log!(logger, LogLevel::Warn, "Formatted: {}", 42);

        let lines = memory.lines();
        assert!(lines[0].ends_with("| INFO | macros | Test message"));
        assert!(lines[1].ends_with("| WARN | macros | Formatted: 42"));
    }

    #[test]
    fn test_log_macro_below_threshold() {
        let (logger, memory) = text_logger();
        logger.set_min_level(LogLevel::Error);
        log!(logger, LogLevel::Debug, "Count: {}", 5);
        assert!(memory.is_empty());
    }

    #[test]
    fn test_module_logger_binds_module_path() {
        let proxy = module_logger!();
        assert_eq!(proxy.try_name().unwrap(), "lodge.macros.tests");
    }
}
