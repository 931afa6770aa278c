//! Environment-driven logger settings
//!
//! Every logger is configured from these variables at the moment it is
//! created. They are not re-read afterwards.
//!
//! | Variable | Default | Effect |
//! |---|---|---|
//! | `LOG_LEVEL` | `INFO` | global minimum level |
//! | `<NAME>_LOG_LEVEL` | unset | per-logger override, see [`level_env_key`] |
//! | `LOG_ENV` | `PROD` | `PROD` selects JSON, anything else pipe-delimited text |
//! | `LOG_BASE_FIELDS` | message, timestamp, level | JSON object of field templates |
//! | `LOG_EXTRA_FIELDS` | `{}` | JSON object merged over the base fields |

use super::error::{LodgeError, Result};
use super::formatter::Formatter;
use super::log_level::LogLevel;
use serde_json::{Map, Value};
use std::collections::HashMap;

pub const LOG_LEVEL_VAR: &str = "LOG_LEVEL";
pub const LOG_ENV_VAR: &str = "LOG_ENV";
pub const LOG_BASE_FIELDS_VAR: &str = "LOG_BASE_FIELDS";
pub const LOG_EXTRA_FIELDS_VAR: &str = "LOG_EXTRA_FIELDS";

pub const DEFAULT_LOG_LEVEL: &str = "INFO";
pub const DEFAULT_LOG_ENV: &str = "PROD";
pub const DEFAULT_BASE_FIELDS: &str =
    r#"{"message":"%(message)s","timestamp":"%(asctime)s","level":"%(levelname)s"}"#;
pub const DEFAULT_EXTRA_FIELDS: &str = "{}";

/// Read-only key/value source consulted when a logger is configured
pub trait EnvSource: Send + Sync {
    fn var(&self, key: &str) -> Option<String>;
}

/// The process environment
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl EnvSource for ProcessEnv {
    fn var(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }
}

impl EnvSource for HashMap<String, String> {
    fn var(&self, key: &str) -> Option<String> {
        self.get(key).cloned()
    }
}

/// Name of the per-logger level variable: `pkg.module` becomes `PKG_MODULE_LOG_LEVEL`
pub fn level_env_key(logger_name: &str) -> String {
    let upper_snake = logger_name.split('.').collect::<Vec<_>>().join("_").to_uppercase();
    format!("{}_LOG_LEVEL", upper_snake)
}

/// Everything a logger needs, resolved from one read of the environment
#[derive(Debug, Clone, PartialEq)]
pub struct LoggerSettings {
    pub level: LogLevel,
    pub formatter: Formatter,
}

impl LoggerSettings {
    pub fn from_env(env: &dyn EnvSource, logger_name: &str) -> Result<Self> {
        Ok(Self {
            level: resolve_level(env, logger_name)?,
            formatter: resolve_formatter(env)?,
        })
    }
}

/// Per-logger override first, then `LOG_LEVEL`, then `INFO`
pub fn resolve_level(env: &dyn EnvSource, logger_name: &str) -> Result<LogLevel> {
    let override_key = level_env_key(logger_name);
    let (variable, value) = match env.var(&override_key) {
        Some(value) => (override_key, value),
        None => (
            LOG_LEVEL_VAR.to_string(),
            env.var(LOG_LEVEL_VAR)
                .unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string()),
        ),
    };

    value
        .parse()
        .map_err(|_| LodgeError::invalid_level(variable, value))
}

/// JSON fields in `PROD`, pipe-delimited text elsewhere.
///
/// The field variables are validated whatever `LOG_ENV` says.
pub fn resolve_formatter(env: &dyn EnvSource) -> Result<Formatter> {
    let base = read_fields(env, LOG_BASE_FIELDS_VAR, DEFAULT_BASE_FIELDS)?;
    let extra = read_fields(env, LOG_EXTRA_FIELDS_VAR, DEFAULT_EXTRA_FIELDS)?;
    let json = Formatter::json_layered([
        (LOG_BASE_FIELDS_VAR, &base),
        (LOG_EXTRA_FIELDS_VAR, &extra),
    ])?;

    let log_env = env
        .var(LOG_ENV_VAR)
        .unwrap_or_else(|| DEFAULT_LOG_ENV.to_string());
    if log_env == DEFAULT_LOG_ENV {
        Ok(json)
    } else {
        Ok(Formatter::text())
    }
}

/// Parse a structured-field variable, which must hold a JSON object
fn read_fields(env: &dyn EnvSource, variable: &str, default: &str) -> Result<Map<String, Value>> {
    let raw = env.var(variable);
    let text = raw.as_deref().unwrap_or(default);

    match serde_json::from_str::<Value>(text) {
        Ok(Value::Object(fields)) => Ok(fields),
        Ok(other) => Err(LodgeError::config_parse(
            variable,
            format!("expected a JSON object, found {}", json_kind(&other)),
        )),
        Err(e) => Err(LodgeError::config_parse(variable, e.to_string())),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
