//! Tests for configuration validation

use std::time::Duration;

use cafe_seating::config::{CafeConfig, GuestConfig, HoldRange};
use cafe_seating::core::{ConfigError, HoldPolicy};

fn guest(name: &str) -> GuestConfig {
    GuestConfig {
        name: name.to_string(),
        hold: None,
    }
}

fn config(tables: u32, guests: Vec<GuestConfig>) -> CafeConfig {
    CafeConfig {
        tables,
        default_hold: HoldRange { min_ms: 10, max_ms: 20 },
        guests,
        worker_threads: None,
    }
}

#[test]
fn test_default_config_is_valid() {
    let cfg = CafeConfig::default();
    assert!(cfg.validate().is_ok());
    assert_eq!(cfg.tables, 5);
    assert_eq!(cfg.guests.len(), 12);
    assert_eq!(cfg.guests[0].name, "Maria");
    assert_eq!(cfg.default_hold, HoldRange { min_ms: 3_000, max_ms: 10_000 });
}

#[test]
fn test_zero_tables_invalid() {
    assert_eq!(config(0, vec![guest("a")]).validate(), Err(ConfigError::NoTables));
}

#[test]
fn test_empty_guest_name_invalid() {
    assert_eq!(
        config(1, vec![guest("a"), guest("")]).validate(),
        Err(ConfigError::EmptyGuestName)
    );
}

#[test]
fn test_duplicate_guest_invalid() {
    assert_eq!(
        config(1, vec![guest("a"), guest("b"), guest("a")]).validate(),
        Err(ConfigError::DuplicateGuest("a".to_string()))
    );
}

#[test]
fn test_hold_range_invalid() {
    let mut cfg = config(1, vec![guest("a")]);
    cfg.default_hold = HoldRange { min_ms: 0, max_ms: 5 };
    assert!(matches!(cfg.validate(), Err(ConfigError::InvalidHoldRange { .. })));

    let mut cfg = config(1, vec![guest("a")]);
    cfg.guests[0].hold = Some(HoldRange { min_ms: 9, max_ms: 4 });
    assert_eq!(
        cfg.validate(),
        Err(ConfigError::InvalidHoldRange { min_ms: 9, max_ms: 4 })
    );
}

#[test]
fn test_zero_worker_threads_invalid() {
    let mut cfg = config(1, Vec::new());
    cfg.worker_threads = Some(0);
    assert_eq!(cfg.validate(), Err(ConfigError::NoWorkerThreads));
}

#[test]
fn test_profiles_apply_overrides() {
    let mut cfg = config(2, vec![guest("a"), guest("b")]);
    cfg.guests[1].hold = Some(HoldRange { min_ms: 7, max_ms: 7 });

    let profiles = cfg.profiles().unwrap();
    assert_eq!(profiles[0].name, "a");
    assert_eq!(
        profiles[0].hold,
        HoldPolicy::Uniform {
            min: Duration::from_millis(10),
            max: Duration::from_millis(20),
        }
    );
    assert_eq!(profiles[1].hold, HoldPolicy::Fixed(Duration::from_millis(7)));
}

#[test]
fn test_config_from_json() {
    let json = r#"{
        "tables": 2,
        "default_hold": { "min_ms": 5, "max_ms": 15 },
        "guests": [
            { "name": "A" },
            { "name": "B", "hold": { "min_ms": 1, "max_ms": 2 } }
        ]
    }"#;

    let cfg = CafeConfig::from_json_str(json).unwrap();
    assert_eq!(cfg.tables, 2);
    assert_eq!(cfg.guests.len(), 2);
    assert_eq!(cfg.guests[1].hold, Some(HoldRange { min_ms: 1, max_ms: 2 }));
    assert_eq!(cfg.worker_threads, None);
}

#[test]
fn test_config_from_json_rejects_invalid() {
    assert!(matches!(
        CafeConfig::from_json_str("{ not json"),
        Err(ConfigError::Parse(_))
    ));
    assert_eq!(
        CafeConfig::from_json_str(r#"{ "tables": 0 }"#),
        Err(ConfigError::NoTables)
    );
}

#[test]
fn test_config_from_missing_file() {
    assert!(matches!(
        CafeConfig::from_json_file("/nonexistent/cafe.json"),
        Err(ConfigError::Parse(_))
    ));
}
