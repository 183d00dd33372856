//! Tests for error types

use cafe_seating::core::{ConfigError, SeatingError};

#[test]
fn test_configuration_error() {
    let err = SeatingError::from(ConfigError::NoTables);
    assert_eq!(
        format!("{}", err),
        "configuration error: table count must be greater than 0"
    );
}

#[test]
fn test_duplicate_guest_error() {
    let err = ConfigError::DuplicateGuest("Maria".to_string());
    assert_eq!(format!("{}", err), "duplicate guest name `Maria`");
}

#[test]
fn test_hold_range_error() {
    let err = ConfigError::InvalidHoldRange { min_ms: 10, max_ms: 3 };
    assert_eq!(format!("{}", err), "invalid holding range: min 10ms, max 3ms");
}

#[test]
fn test_protocol_violation_error() {
    let err = SeatingError::ProtocolViolation("arrival after close".to_string());
    assert_eq!(format!("{}", err), "protocol violation: arrival after close");
}

#[test]
fn test_invariant_violation_error() {
    let err = SeatingError::InvariantViolation("table 1 is already free".to_string());
    assert_eq!(format!("{}", err), "invariant violation: table 1 is already free");
}

#[test]
fn test_ledger_rejected_error() {
    let err = SeatingError::LedgerRejected { requested: 500, balance: 120 };
    assert_eq!(format!("{}", err), "withdrawal of 500 rejected: balance is 120");
}
