//! Caller-transparent proxy logger
//!
//! A [`ProxyLogger`] never needs a logger name from its call sites. The name
//! is bound one of two ways:
//!
//! - at compile time, with `module_path!()` ([`ProxyLogger::for_module`] and
//!   the level macros), normalised from `a::b` to `a.b`
//! - per call, from the caller's source location via `#[track_caller]`
//!   and a [`CallerResolver`] (the global [`LOGGER`])
//!
//! On every call the proxy resolves the named logger through the registry,
//! creating and configuring it from the environment on first use, then
//! forwards the record.

use super::{
    error::{LodgeError, Result},
    log_level::LogLevel,
    logger::Logger,
    registry::{self, LoggerRegistry},
};
use std::error::Error;
use std::fmt;
use std::panic::Location;
use std::sync::Arc;

/// Logger used when a caller cannot be attributed to a module
pub const ROOT_LOGGER_NAME: &str = "root";

/// Global proxy, attributing each call to the caller's source file
pub static LOGGER: ProxyLogger = ProxyLogger::caller();

/// Maps a call site to a logger name
pub trait CallerResolver: Send + Sync {
    fn caller_name(&self, location: &Location<'_>) -> Option<String>;
}

/// Derives a dotted module name from a source path.
///
/// `src/net/client.rs` becomes `net.client`; `mod.rs`, `lib.rs` and
/// `main.rs` name their parent directory. Paths outside a `src/` tree keep
/// their leading directories, so `tests/proxy.rs` becomes `tests.proxy`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SourcePathResolver;

impl CallerResolver for SourcePathResolver {
    fn caller_name(&self, location: &Location<'_>) -> Option<String> {
        module_name_from_path(location.file())
    }
}

pub(crate) fn module_name_from_path(path: &str) -> Option<String> {
    let normalized = path.replace('\\', "/");
    let relative = match normalized.rfind("src/") {
        Some(idx) if idx == 0 || normalized[..idx].ends_with('/') => &normalized[idx + 4..],
        _ => normalized.trim_start_matches("./"),
    };
    let without_ext = relative.strip_suffix(".rs").unwrap_or(relative);

    let mut segments: Vec<&str> = without_ext
        .split('/')
        .filter(|segment| !segment.is_empty() && *segment != "." && *segment != "..")
        .collect();
    if matches!(segments.last(), Some(&"mod") | Some(&"lib") | Some(&"main")) {
        segments.pop();
    }

    if segments.is_empty() {
        None
    } else {
        Some(segments.join("."))
    }
}

/// `crate::net::client` becomes `crate.net.client`
pub fn normalize_module_path(module_path: &str) -> String {
    module_path.replace("::", ".")
}

enum Binding {
    Module(&'static str),
    Caller,
    Resolver(Arc<dyn CallerResolver>),
}

pub struct ProxyLogger {
    binding: Binding,
    registry: Option<Arc<LoggerRegistry>>,
}

impl ProxyLogger {
    /// Proxy bound to a module path, usually `module_path!()`
    pub const fn for_module(module_path: &'static str) -> Self {
        Self {
            binding: Binding::Module(module_path),
            registry: None,
        }
    }

    /// Proxy attributing each call to its caller's source file
    pub const fn caller() -> Self {
        Self {
            binding: Binding::Caller,
            registry: None,
        }
    }

    pub fn with_resolver<R: CallerResolver + 'static>(resolver: R) -> Self {
        Self {
            binding: Binding::Resolver(Arc::new(resolver)),
            registry: None,
        }
    }

    /// Resolve loggers through `registry` instead of the global one
    #[must_use]
    pub fn with_registry(mut self, registry: Arc<LoggerRegistry>) -> Self {
        self.registry = Some(registry);
        self
    }

    fn registry(&self) -> &LoggerRegistry {
        match self.registry {
            Some(ref registry) => registry,
            None => registry::global(),
        }
    }

    /// Name this call would be attributed to
    #[track_caller]
    pub fn try_name(&self) -> Result<String> {
        let location = Location::caller();
        let name = match &self.binding {
            Binding::Module(path) => Some(normalize_module_path(path)),
            Binding::Caller => SourcePathResolver.caller_name(location),
            Binding::Resolver(resolver) => resolver.caller_name(location),
        };

        match name {
            Some(name) if !name.is_empty() => Ok(name),
            _ => Err(LodgeError::attribution(location.to_string())),
        }
    }

    /// Attributed name, falling back to [`ROOT_LOGGER_NAME`]
    #[track_caller]
    pub fn name(&self) -> String {
        self.try_name()
            .unwrap_or_else(|_| ROOT_LOGGER_NAME.to_string())
    }

    /// The logger this call resolves to, creating it on first use
    #[track_caller]
    pub fn try_logger(&self) -> Result<Arc<Logger>> {
        let name = self.name();
        self.registry().resolve(&name)
    }

    #[track_caller]
    fn logger(&self) -> Option<Arc<Logger>> {
        match self.try_logger() {
            Ok(logger) => Some(logger),
            Err(e) => {
                eprintln!("[LODGE ERROR] Failed to resolve logger: {}", e);
                None
            }
        }
    }

    #[track_caller]
    pub fn log(&self, level: LogLevel, message: impl Into<String>) {
        if let Some(logger) = self.logger() {
            logger.log(level, message);
        }
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

    /// Like [`ProxyLogger::error`], followed by the error's trace text
    #[track_caller]
    pub fn exception<E>(&self, message: impl Into<String>, error: &E)
    where
        E: Error + ?Sized,
    {
        if let Some(logger) = self.logger() {
            logger.exception(message, error);
        }
    }
}

impl fmt::Debug for ProxyLogger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let binding = match &self.binding {
            Binding::Module(path) => format!("module({})", path),
            Binding::Caller => "caller".to_string(),
            Binding::Resolver(_) => "resolver".to_string(),
        };
        f.debug_struct("ProxyLogger")
            .field("binding", &binding)
            .field("global_registry", &self.registry.is_none())
            .finish()
    }
}
