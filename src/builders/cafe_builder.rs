//! Builders to construct a ready-to-run cafe from configuration.

use crate::config::CafeConfig;
use crate::core::{
    Coordinator, GuestProfile, Occupancy, SeatingError, SharedEventSink, Spawn, TablePool,
};
use crate::infra::InMemoryWaitQueue;

/// A coordinator plus the guests configured to arrive.
pub struct Cafe<O, S> {
    /// Coordinator owning the table pool.
    pub coordinator: Coordinator<InMemoryWaitQueue, O, S>,
    /// Guests in arrival order.
    pub guests: Vec<GuestProfile>,
}

/// Build a cafe from configuration using the in-memory wait queue.
///
/// Fails fast on invalid configuration; no pool is created in that case.
pub fn build_cafe<O, S>(
    cfg: &CafeConfig,
    occupancy: O,
    spawner: S,
    events: Option<SharedEventSink>,
) -> Result<Cafe<O, S>, SeatingError>
where
    O: Occupancy,
    S: Spawn,
{
    let guests = cfg.profiles()?;
    let queue = InMemoryWaitQueue::with_capacity(guests.len());
    let (pool, departures) = TablePool::new(cfg.tables, queue, occupancy, spawner)?;
    let pool = match events {
        Some(sink) => pool.with_events(sink),
        None => pool,
    };
    tracing::debug!(
        "built cafe with {} tables and {} guests",
        cfg.tables,
        guests.len()
    );
    Ok(Cafe {
        coordinator: Coordinator::new(pool, departures),
        guests,
    })
}
