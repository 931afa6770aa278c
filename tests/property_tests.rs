//! Property-based tests for lodge using proptest

use lodge::prelude::*;
use lodge::level_env_key;
use proptest::prelude::*;
use std::collections::HashMap;

fn any_level() -> impl Strategy<Value = LogLevel> {
    prop_oneof![
        Just(LogLevel::Debug),
        Just(LogLevel::Info),
        Just(LogLevel::Warn),
        Just(LogLevel::Error),
        Just(LogLevel::Fatal),
    ]
}

// ============================================================================
// LogLevel Tests
// ============================================================================

proptest! {
    /// Labels parse back to the same level
    #[test]
    fn test_log_level_label_roundtrip(level in any_level()) {
        let parsed: LogLevel = level.label().parse().unwrap();
        prop_assert_eq!(level, parsed);
    }

    /// Ordering follows the numeric severity
    #[test]
    fn test_log_level_ordering(level1 in any_level(), level2 in any_level()) {
        prop_assert_eq!(level1 <= level2, level1.number() <= level2.number());
        prop_assert_eq!(level1 < level2, level1.number() < level2.number());
    }

    /// Lowercase names are rejected: levels are case-sensitive
    #[test]
    fn test_log_level_lowercase_rejected(level in any_level()) {
        let lower = level.label().to_lowercase();
        prop_assert!(lower.parse::<LogLevel>().is_err());
    }
}

// ============================================================================
// Environment key Tests
// ============================================================================

proptest! {
    /// Dots become underscores, everything is uppercased, suffix is appended
    #[test]
    fn test_level_env_key_shape(segments in prop::collection::vec("[a-z][a-z0-9_]{0,8}", 1..5)) {
        let name = segments.join(".");
        let key = level_env_key(&name);

        prop_assert!(key.ends_with("_LOG_LEVEL"));
        prop_assert!(!key.contains('.'));
        prop_assert_eq!(key, format!("{}_LOG_LEVEL", segments.join("_").to_uppercase()));
    }

    /// An override for one name never leaks to a different name
    #[test]
    fn test_override_scoped_to_name(
        a in "[a-z]{1,6}\\.[a-z]{1,6}",
        b in "[a-z]{1,6}\\.[a-z]{1,6}",
    ) {
        prop_assume!(level_env_key(&a) != level_env_key(&b));

        let mut env = HashMap::new();
        env.insert(level_env_key(&a), "FATAL".to_string());
        let registry = LoggerRegistry::with_env_and_stream(env, MemoryStream::new().into());

        prop_assert_eq!(registry.configure(&a).unwrap().min_level(), LogLevel::Fatal);
        prop_assert_eq!(registry.configure(&b).unwrap().min_level(), LogLevel::Info);
    }
}

// ============================================================================
// Threshold Tests
// ============================================================================

proptest! {
    /// One line at or above the threshold, none below, in either format
    #[test]
    fn test_threshold_line_count(
        threshold in any_level(),
        emitted in any_level(),
        text_mode in any::<bool>(),
        message in "[a-zA-Z0-9 ]{0,40}",
    ) {
        let mut env = HashMap::new();
        env.insert("LOG_LEVEL".to_string(), threshold.label().to_string());
        if text_mode {
            env.insert("LOG_ENV".to_string(), "DEV".to_string());
        }
        let memory = MemoryStream::new();
        let registry = LoggerRegistry::with_env_and_stream(env, memory.clone().into());

        let logger = registry.configure("prop.logger").unwrap();
        logger.log(emitted, message.clone());

        let expected = usize::from(emitted >= threshold);
        prop_assert_eq!(memory.lines().len(), expected);

        if expected == 1 && !text_mode {
            let record: serde_json::Value = serde_json::from_str(&memory.lines()[0]).unwrap();
            prop_assert_eq!(record["message"].as_str(), Some(message.as_str()));
            prop_assert_eq!(record["level"].as_str(), Some(emitted.label()));
        }
    }

    /// Arbitrary messages always yield valid single-line JSON
    #[test]
    fn test_json_records_always_parse(message in any::<String>()) {
        let memory = MemoryStream::new();
        let registry = LoggerRegistry::with_env_and_stream(HashMap::new(), memory.clone().into());
        registry.configure("json").unwrap().error(message.clone());

        let contents = memory.contents();
        prop_assert_eq!(contents.matches('\n').count(), 1);
        let record: serde_json::Value = serde_json::from_str(contents.trim_end()).unwrap();
        prop_assert_eq!(record["message"].as_str(), Some(message.as_str()));
    }
}
