//! Process-wide logger registry
//!
//! The registry owns every configured logger, keyed by name. Lookup-or-create
//! runs under a single mutex, so two threads asking for the same new name
//! always get the same logger with exactly one appender.

use super::{
    env_config::{EnvSource, LoggerSettings, ProcessEnv},
    error::Result,
    logger::Logger,
};
use crate::appenders::LogStream;
use once_cell::sync::Lazy;
use parking_lot::{Mutex, RwLock};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

static GLOBAL_REGISTRY: Lazy<LoggerRegistry> = Lazy::new(LoggerRegistry::new);

/// Registry backing [`crate::get_logger`] and the proxies, reading the process environment
pub fn global() -> &'static LoggerRegistry {
    &GLOBAL_REGISTRY
}

pub struct LoggerRegistry {
    loggers: Mutex<HashMap<String, Arc<Logger>>>,
    env: Box<dyn EnvSource>,
    stream: RwLock<LogStream>,
}

impl LoggerRegistry {
    /// Registry over the process environment, writing to stderr
    pub fn new() -> Self {
        Self::with_env(ProcessEnv)
    }

    pub fn with_env<E: EnvSource + 'static>(env: E) -> Self {
        Self::with_env_and_stream(env, LogStream::stderr())
    }

    pub fn with_env_and_stream<E: EnvSource + 'static>(env: E, stream: LogStream) -> Self {
        Self {
            loggers: Mutex::new(HashMap::new()),
            env: Box::new(env),
            stream: RwLock::new(stream),
        }
    }

    /// Stream handed to loggers configured from now on
    pub fn stream(&self) -> LogStream {
        self.stream.read().clone()
    }

    /// Swap the output stream.
    ///
    /// Only loggers configured afterwards pick up the new stream; existing
    /// loggers keep writing where they were configured to.
    pub fn set_stream(&self, stream: LogStream) {
        *self.stream.write() = stream;
    }

    /// Configure (or reconfigure) the named logger from the environment.
    ///
    /// The environment is read on every call. An existing logger keeps its
    /// identity but its level and appender are replaced, so repeated calls
    /// never stack duplicate output. On error nothing is registered or changed.
    pub fn configure(&self, name: &str) -> Result<Arc<Logger>> {
        let settings = LoggerSettings::from_env(self.env.as_ref(), name)?;
        let stream = self.stream();

        let mut loggers = self.loggers.lock();
        let logger = loggers
            .entry(name.to_string())
            .or_insert_with(|| Arc::new(Logger::new(name)));
        logger.apply(settings, stream);
        Ok(Arc::clone(logger))
    }

    /// Return the registered logger, configuring it first if the name is new.
    ///
    /// A registered logger is returned unchanged: the environment is not re-read.
    pub fn resolve(&self, name: &str) -> Result<Arc<Logger>> {
        let mut loggers = self.loggers.lock();
        if let Some(logger) = loggers.get(name) {
            return Ok(Arc::clone(logger));
        }

        let settings = LoggerSettings::from_env(self.env.as_ref(), name)?;
        let logger = Arc::new(Logger::new(name));
        logger.apply(settings, self.stream());
        loggers.insert(name.to_string(), Arc::clone(&logger));
        Ok(logger)
    }

    pub fn get(&self, name: &str) -> Option<Arc<Logger>> {
        self.loggers.lock().get(name).cloned()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.loggers.lock().contains_key(name)
    }

    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.loggers.lock().keys().cloned().collect();
        names.sort();
        names
    }

    pub fn len(&self) -> usize {
        self.loggers.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.loggers.lock().is_empty()
    }

    /// Forget every registered logger; the next request rebuilds from the environment.
    ///
    /// Handles already given out keep working with their old configuration.
    pub fn reset(&self) {
        self.loggers.lock().clear();
    }

    /// Flush every registered logger, reporting the first failure
    pub fn flush(&self) -> Result<()> {
        let loggers: Vec<Arc<Logger>> = self.loggers.lock().values().cloned().collect();
        for logger in loggers {
            logger.flush()?;
        }
        Ok(())
    }
}

impl Default for LoggerRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for LoggerRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoggerRegistry")
            .field("loggers", &self.names())
            .field("stream", &*self.stream.read())
            .finish()
    }
}
