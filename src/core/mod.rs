//! Core logger types and traits

pub mod appender;
pub mod env_config;
pub mod error;
pub mod formatter;
pub mod log_level;
pub mod log_record;
pub mod logger;
pub mod proxy;
pub mod registry;
pub mod template;

pub use appender::Appender;
pub use env_config::{level_env_key, EnvSource, LoggerSettings, ProcessEnv};
pub use error::{LodgeError, Result};
pub use formatter::{FieldTemplate, Formatter, TEXT_FORMAT};
pub use log_level::LogLevel;
pub use log_record::LogRecord;
pub use logger::{error_trace, Logger, LoggerBuilder};
pub use proxy::{CallerResolver, ProxyLogger, SourcePathResolver, LOGGER, ROOT_LOGGER_NAME};
pub use registry::LoggerRegistry;
pub use template::Template;
