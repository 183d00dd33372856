//! Tests for builders

use cafe_seating::builders::build_cafe;
use cafe_seating::config::{CafeConfig, GuestConfig, HoldRange};
use cafe_seating::core::{
    share_sink, ConfigError, CoordinatorState, DiningOccupancy, InMemoryEventSink, SeatingError,
};
use cafe_seating::runtime::TokioSpawner;

fn small_config() -> CafeConfig {
    CafeConfig {
        tables: 2,
        default_hold: HoldRange { min_ms: 1, max_ms: 3 },
        guests: ["A", "B", "C"]
            .iter()
            .map(|n| GuestConfig {
                name: (*n).to_string(),
                hold: None,
            })
            .collect(),
        worker_threads: None,
    }
}

#[tokio::test]
async fn test_build_cafe_from_config() {
    let sink = InMemoryEventSink::new(64);
    let cafe = build_cafe(
        &small_config(),
        DiningOccupancy,
        TokioSpawner::current(),
        Some(share_sink(sink.clone())),
    )
    .unwrap();

    assert_eq!(cafe.guests.len(), 3);
    assert_eq!(cafe.coordinator.state(), CoordinatorState::Open);
    assert_eq!(cafe.coordinator.pool().capacity(), 2);

    let report = cafe.coordinator.run(cafe.guests).await.unwrap();
    assert_eq!(report.seating_order(), vec!["A", "B", "C"]);
    assert_eq!(sink.seating_order(), vec!["A", "B", "C"]);
}

#[tokio::test]
async fn test_build_cafe_rejects_invalid_config() {
    let mut cfg = small_config();
    cfg.guests.push(GuestConfig {
        name: "A".to_string(),
        hold: None,
    });

    let result = build_cafe(&cfg, DiningOccupancy, TokioSpawner::current(), None);
    assert!(matches!(
        result.err(),
        Some(SeatingError::Configuration(ConfigError::DuplicateGuest(_)))
    ));
}
