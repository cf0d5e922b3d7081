// tests/logging.rs

use parlint::logging::{LogLevel, resolve_level};

#[test]
fn explicit_level_wins_over_environment() {
    assert_eq!(
        resolve_level(Some(LogLevel::Debug), Some("error")),
        tracing::Level::DEBUG
    );
}

#[test]
fn environment_value_is_used_when_no_level_is_given() {
    assert_eq!(resolve_level(None, Some(" Warning ")), tracing::Level::WARN);
    assert_eq!(resolve_level(None, Some("trace")), tracing::Level::TRACE);
}

#[test]
fn unknown_or_missing_values_default_to_info() {
    assert_eq!(resolve_level(None, Some("loud")), tracing::Level::INFO);
    assert_eq!(resolve_level(None, None), tracing::Level::INFO);
}

#[test]
fn log_level_parse_errors_name_the_value() {
    let err = "loud".parse::<LogLevel>().unwrap_err();
    assert!(err.contains("loud"));
}
