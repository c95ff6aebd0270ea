//! Tests for core_kernel error types

use core_kernel::error::CoreError;
use core_kernel::temporal::TemporalError;
use core_kernel::YearMonth;

#[test]
fn test_core_error_validation() {
    let error = CoreError::validation("Invalid input");

    match error {
        CoreError::Validation(msg) => assert_eq!(msg, "Invalid input"),
        _ => panic!("Expected Validation error"),
    }
}

#[test]
fn test_core_error_invalid_identifier() {
    let error = CoreError::invalid_identifier("WRK-abc");

    match error {
        CoreError::InvalidIdentifier(msg) => assert_eq!(msg, "WRK-abc"),
        _ => panic!("Expected InvalidIdentifier error"),
    }
}

#[test]
fn test_core_error_from_temporal_error() {
    let temporal = "2025/01".parse::<YearMonth>().unwrap_err();
    let core_error: CoreError = temporal.into();

    assert!(matches!(core_error, CoreError::Temporal(TemporalError::InvalidYearMonth(_))));
}

#[test]
fn test_temporal_error_display_names_input() {
    let error = "2025-1".parse::<YearMonth>().unwrap_err();
    let display = error.to_string();

    assert!(display.contains("2025-1"));
    assert!(display.contains("YYYY-MM"));
}
