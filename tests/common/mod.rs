//! Shared helpers for integration tests.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use cafe_seating::core::{
    share_sink, Coordinator, GuestProfile, HoldPolicy, InMemoryEventSink, Occupancy, TableNumber,
    TablePool,
};
use cafe_seating::infra::InMemoryWaitQueue;
use cafe_seating::runtime::TokioSpawner;
use parking_lot::Mutex;
use tokio::sync::Notify;

/// Occupancy that holds the table until the test releases the guest.
#[derive(Clone, Default)]
pub struct GatedOccupancy {
    gates: Arc<Mutex<HashMap<String, Arc<Notify>>>>,
}

impl GatedOccupancy {
    fn gate(&self, guest: &str) -> Arc<Notify> {
        Arc::clone(
            self.gates
                .lock()
                .entry(guest.to_string())
                .or_insert_with(|| Arc::new(Notify::new())),
        )
    }

    /// Let `guest` finish. A permit is stored if it has not started waiting yet.
    pub fn release(&self, guest: &str) {
        self.gate(guest).notify_one();
    }
}

#[async_trait]
impl Occupancy for GatedOccupancy {
    async fn occupy(&self, guest: &str, _table: TableNumber, _hold: Duration) {
        let gate = self.gate(guest);
        gate.notified().await;
    }
}

pub type GatedCoordinator = Coordinator<InMemoryWaitQueue, GatedOccupancy, TokioSpawner>;

/// Coordinator over `tables` tables whose guests leave only when released.
pub fn gated_cafe(tables: u32) -> (GatedCoordinator, GatedOccupancy, InMemoryEventSink) {
    let gates = GatedOccupancy::default();
    let sink = InMemoryEventSink::new(10_000);
    let (pool, departures) = TablePool::new(
        tables,
        InMemoryWaitQueue::new(),
        gates.clone(),
        TokioSpawner::current(),
    )
    .expect("valid table count");
    let pool = pool.with_events(share_sink(sink.clone()));
    (Coordinator::new(pool, departures), gates, sink)
}

/// Guest with a short fixed holding time.
pub fn guest(name: &str) -> GuestProfile {
    GuestProfile::new(name, HoldPolicy::Fixed(Duration::from_millis(5)))
}

/// Guests named by `names`, in order.
pub fn guests(names: &[&str]) -> Vec<GuestProfile> {
    names.iter().map(|n| guest(n)).collect()
}
