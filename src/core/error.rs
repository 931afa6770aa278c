//! Error types for lodge

pub type Result<T> = std::result::Result<T, LodgeError>;

#[derive(Debug, thiserror::Error)]
pub enum LodgeError {
    /// A structured-field variable could not be parsed, or holds an invalid template
    #[error("Failed to parse {variable}: {message}")]
    ConfigParse { variable: String, message: String },

    /// A level variable names no known severity
    #[error("Invalid log level '{value}' in {variable}")]
    InvalidLevel { variable: String, value: String },

    /// The caller could not be mapped to a logger name
    #[error("Could not attribute log call at {location} to a module")]
    AttributionFailure { location: String },

    /// IO error with context
    #[error("IO error while {operation}: {message}")]
    IoOperation {
        operation: String,
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Generic IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl LodgeError {
    /// Create a parse error for an environment variable
    pub fn config_parse(variable: impl Into<String>, message: impl Into<String>) -> Self {
        LodgeError::ConfigParse {
            variable: variable.into(),
            message: message.into(),
        }
    }

    /// Create an invalid level error
    pub fn invalid_level(variable: impl Into<String>, value: impl Into<String>) -> Self {
        LodgeError::InvalidLevel {
            variable: variable.into(),
            value: value.into(),
        }
    }

    pub fn attribution(location: impl Into<String>) -> Self {
        LodgeError::AttributionFailure {
            location: location.into(),
        }
    }

    /// Create an IO operation error with context
    pub fn io_operation(
        operation: impl Into<String>,
        message: impl Into<String>,
        source: std::io::Error,
    ) -> Self {
        LodgeError::IoOperation {
            operation: operation.into(),
            message: message.into(),
            source,
        }
    }

    /// Create a generic error
    pub fn other<S: Into<String>>(msg: S) -> Self {
        LodgeError::Other(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let err = LodgeError::config_parse("LOG_EXTRA_FIELDS", "expected value");
        assert!(matches!(err, LodgeError::ConfigParse { .. }));

        let err = LodgeError::invalid_level("LOG_LEVEL", "LOUD");
        assert!(matches!(err, LodgeError::InvalidLevel { .. }));

        let err = LodgeError::attribution("<unknown>:0");
        assert!(matches!(err, LodgeError::AttributionFailure { .. }));
    }

    #[test]
    fn test_error_display() {
        let err = LodgeError::invalid_level("MYLOG_TEST_LOG_LEVEL", "verbose");
        assert_eq!(
            err.to_string(),
            "Invalid log level 'verbose' in MYLOG_TEST_LOG_LEVEL"
        );

        let err = LodgeError::config_parse("LOG_BASE_FIELDS", "expected a JSON object");
        assert_eq!(
            err.to_string(),
            "Failed to parse LOG_BASE_FIELDS: expected a JSON object"
        );
    }

    #[test]
    fn test_io_operation_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "access denied");
        let err = LodgeError::io_operation("opening log stream", "cannot open file", io_err);

        assert!(matches!(err, LodgeError::IoOperation { .. }));
        assert!(err.to_string().contains("opening log stream"));
        assert!(err.to_string().contains("cannot open file"));
    }
}
