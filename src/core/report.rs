//! Closure report returned when the cafe closes.

use serde::{Deserialize, Serialize};

use super::TableNumber;

/// How one guest was served.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceRecord {
    /// Guest name.
    pub guest: String,
    /// Table the guest used.
    pub table: TableNumber,
    /// 1-based position in overall seating order.
    pub seat_order: u64,
    /// Whether the guest had to wait in the queue.
    pub queued: bool,
    /// Time between arrival and seating.
    pub waited_ms: u64,
    /// Sampled holding time.
    pub held_ms: u64,
}

/// Summary emitted once on closure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClosureReport {
    /// Number of tables in the pool.
    pub tables: u32,
    /// Guests served.
    pub served: usize,
    /// Per-guest records in seating order.
    pub records: Vec<ServiceRecord>,
    /// Arrivals rejected while serving a stream.
    pub rejected: Vec<String>,
    /// Closure timestamp (ms since epoch).
    pub closed_at_ms: u128,
}

impl ClosureReport {
    /// Guest names in the order they were seated.
    pub fn seating_order(&self) -> Vec<&str> {
        self.records.iter().map(|r| r.guest.as_str()).collect()
    }

    /// Record for a guest.
    pub fn record_for(&self, guest: &str) -> Option<&ServiceRecord> {
        self.records.iter().find(|r| r.guest == guest)
    }

    /// Number of guests that waited in the queue.
    pub fn queued_count(&self) -> usize {
        self.records.iter().filter(|r| r.queued).count()
    }

    /// Pretty JSON rendering for persistence collaborators.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
