//! Log level definitions

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[derive(Default)]
pub enum LogLevel {
    Debug = 10,
    #[default]
    Info = 20,
    Warn = 30,
    Error = 40,
    Fatal = 50,
}

impl LogLevel {
    pub const ALL: [LogLevel; 5] = [
        LogLevel::Debug,
        LogLevel::Info,
        LogLevel::Warn,
        LogLevel::Error,
        LogLevel::Fatal,
    ];

    /// Display label for this level.
    ///
    /// The table is fixed: the levels conventionally labelled `WARNING` and
    /// `CRITICAL` always render as `WARN` and `FATAL`.
    pub fn label(&self) -> &'static str {
        match self {
            LogLevel::Debug => "DEBUG",
            LogLevel::Info => "INFO",
            LogLevel::Warn => "WARN",
            LogLevel::Error => "ERROR",
            LogLevel::Fatal => "FATAL",
        }
    }

    /// Numeric severity, as rendered by the `levelno` placeholder
    pub fn number(&self) -> u8 {
        *self as u8
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Case-sensitive: level names from the environment are taken as provided.
impl FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "DEBUG" => Ok(LogLevel::Debug),
            "INFO" => Ok(LogLevel::Info),
            "WARN" | "WARNING" => Ok(LogLevel::Warn),
            "ERROR" => Ok(LogLevel::Error),
            "FATAL" | "CRITICAL" => Ok(LogLevel::Fatal),
            _ => Err(format!("Invalid log level: '{}'", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_ordering() {
        assert!(LogLevel::Debug < LogLevel::Info);
        assert!(LogLevel::Info < LogLevel::Warn);
        assert!(LogLevel::Warn < LogLevel::Error);
        assert!(LogLevel::Error < LogLevel::Fatal);
    }

    #[test]
    fn test_renamed_labels() {
        assert_eq!("WARNING".parse::<LogLevel>().unwrap().label(), "WARN");
        assert_eq!("CRITICAL".parse::<LogLevel>().unwrap().label(), "FATAL");
    }

    #[test]
    fn test_parse_is_case_sensitive() {
        assert!("debug".parse::<LogLevel>().is_err());
        assert!("Info".parse::<LogLevel>().is_err());
        assert_eq!("DEBUG".parse::<LogLevel>(), Ok(LogLevel::Debug));
    }

    #[test]
    fn test_level_numbers() {
        assert_eq!(LogLevel::Info.number(), 20);
        assert_eq!(LogLevel::Fatal.number(), 50);
    }
}
