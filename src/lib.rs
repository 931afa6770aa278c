//! # Lodge
//!
//! Structured logging configured entirely from environment variables.
//!
//! ## Features
//!
//! - **Per-logger levels**: `LOG_LEVEL`, overridden per logger by `<NAME>_LOG_LEVEL`
//! - **Two formats**: JSON records in `PROD`, pipe-delimited text elsewhere (`LOG_ENV`)
//! - **Custom fields**: `LOG_BASE_FIELDS` and `LOG_EXTRA_FIELDS` shape each JSON record
//! - **No logger plumbing**: proxies and macros resolve the calling module's logger
//!
//! ```
//! use lodge::{info, LOG};
//!
//! info!("Listening on port {}", 8080);
//! LOG.warn("Cache is cold");
//! ```

pub mod appenders;
pub mod core;
pub mod macros;

use std::sync::Arc;

pub mod prelude {
    pub use crate::appenders::{LogStream, MemoryStream, StreamAppender};
    pub use crate::core::{
        Appender, CallerResolver, EnvSource, Formatter, LodgeError, LogLevel, LogRecord, Logger,
        LoggerBuilder, LoggerRegistry, LoggerSettings, ProcessEnv, ProxyLogger, Result,
        SourcePathResolver, Template, LOGGER, ROOT_LOGGER_NAME,
    };
    pub use crate::{default_stream, get_logger, set_default_stream};
}

pub use appenders::{LogStream, MemoryStream, StreamAppender};
pub use crate::core::registry::global;
pub use crate::core::{
    error_trace, level_env_key, Appender, CallerResolver, EnvSource, FieldTemplate, Formatter,
    LodgeError, LogLevel, LogRecord, Logger, LoggerBuilder, LoggerRegistry, LoggerSettings,
    ProcessEnv, ProxyLogger, Result, SourcePathResolver, Template, LOGGER, ROOT_LOGGER_NAME,
    TEXT_FORMAT,
};

/// Shorter alias for [`LOGGER`]
pub use crate::core::proxy::LOGGER as LOG;

/// Configure the named logger from the environment and return it.
///
/// Prefer the proxies and macros, which resolve the caller's logger
/// themselves. Calling this again for the same name re-reads the
/// environment and replaces the logger's level and output.
pub fn get_logger(name: &str) -> Result<Arc<Logger>> {
    global().configure(name)
}

/// Redirect loggers configured from now on, e.g. to capture output in tests
pub fn set_default_stream(stream: LogStream) {
    global().set_stream(stream);
}

pub fn default_stream() -> LogStream {
    global().stream()
}
