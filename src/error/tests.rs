use crate::error::format::format_error_with_color;
use crate::error::*;

#[test]
fn test_error_context_invalid_version() {
    let error = JdkWatchError::InvalidVersionFormat("abc".to_string());
    let context = ErrorContext::new(&error);

    assert!(context.suggestion.is_some());
    assert!(context.suggestion.unwrap().contains("1.8.0_312"));
    assert_eq!(context.details.as_deref(), Some("Invalid format: abc"));
}

#[test]
fn test_error_context_metadata_fetch() {
    let error = JdkWatchError::MetadataFetch("connection refused".to_string());
    let context = ErrorContext::new(&error);

    assert!(context.suggestion.unwrap().contains("JDKWATCH_API__BASE_URL"));
    assert!(context.details.unwrap().contains("connection refused"));
}

#[test]
fn test_error_context_without_suggestion() {
    let error = JdkWatchError::InvalidMetadata("missing result field".to_string());
    let context = ErrorContext::new(&error);

    assert!(context.suggestion.is_none());
    assert!(context.details.is_none());
}

#[test]
fn test_format_error_chain() {
    let error = JdkWatchError::InvalidConfig("scan.workers must be at least 1".to_string());
    let formatted = format_error_chain(&error);

    assert!(formatted.starts_with("Error: Invalid configuration: scan.workers"));
    assert!(formatted.contains("Suggestion:"));
    assert!(formatted.contains("config-init"));
}

#[test]
fn test_format_error_without_color_matches_chain() {
    let error = JdkWatchError::ConfigError("bad key".to_string());
    assert_eq!(
        format_error_with_color(&error, false),
        format_error_chain(&error)
    );
}

#[test]
fn test_io_error_context() {
    let io_error = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
    let error = JdkWatchError::Io(io_error);
    let context = ErrorContext::new(&error);

    assert!(context.suggestion.unwrap().contains("permissions"));
    assert!(context.details.unwrap().contains("denied"));
}

#[test]
fn test_exit_codes() {
    assert_eq!(
        get_exit_code(&JdkWatchError::InvalidVersionFormat("x".to_string())),
        2
    );
    assert_eq!(
        get_exit_code(&JdkWatchError::MetadataFetch("x".to_string())),
        20
    );
    assert_eq!(
        get_exit_code(&JdkWatchError::ProcessSpawn {
            path: "/opt/jdk/bin/java".to_string(),
            reason: "not executable".to_string(),
        }),
        1
    );
}
