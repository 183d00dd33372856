//! Tests for utility functions

use std::time::Duration;

use cafe_seating::util::{init_tracing, millis, now_ms};

#[test]
fn test_now_ms_monotonic_enough() {
    let a = now_ms();
    let b = now_ms();
    assert!(b >= a);
}

#[test]
fn test_millis() {
    assert_eq!(millis(Duration::from_millis(42)), 42);
    assert_eq!(millis(Duration::ZERO), 0);
}

#[test]
fn test_init_tracing_is_idempotent() {
    init_tracing();
    init_tracing();
}
