//! Tests for runtime adapters

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use cafe_seating::core::Spawn;
use cafe_seating::runtime::{build_runtime, TokioSpawner};

#[test]
fn test_tokio_spawner_joins_tasks() {
    let runtime = build_runtime(Some(2)).unwrap();
    let counter = Arc::new(AtomicUsize::new(0));

    let pending = runtime.block_on(async {
        let spawner = TokioSpawner::current();
        for _ in 0..5 {
            let counter = Arc::clone(&counter);
            spawner.spawn(async move {
                counter.fetch_add(1, Ordering::SeqCst);
            });
        }
        spawner.join_all().await;
        spawner.pending()
    });

    assert_eq!(counter.load(Ordering::SeqCst), 5);
    assert_eq!(pending, 0);
}

#[test]
fn test_build_runtime_defaults_to_cpu_count() {
    let runtime = build_runtime(None).unwrap();
    assert_eq!(runtime.block_on(async { 1 + 1 }), 2);
}
