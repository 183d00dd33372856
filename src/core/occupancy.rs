//! What a seated guest does while holding a table.

use std::time::Duration;

use async_trait::async_trait;

use super::TableNumber;

/// Abstraction for the work a guest performs while seated.
///
/// The pool spawns one `occupy` future per seated guest; when it resolves the
/// guest is marked departed and a completion signal is sent to the coordinator.
/// Implementations must not touch pool state.
///
/// # Example
///
/// ```rust,ignore
/// use async_trait::async_trait;
/// use cafe_seating::core::{Occupancy, TableNumber};
/// use std::time::Duration;
///
/// #[derive(Clone)]
/// struct Espresso;
///
/// #[async_trait]
/// impl Occupancy for Espresso {
///     async fn occupy(&self, _guest: &str, _table: TableNumber, _hold: Duration) {
///         tokio::time::sleep(Duration::from_millis(5)).await;
///     }
/// }
/// ```
#[async_trait]
pub trait Occupancy: Send + Sync + Clone + 'static {
    /// Hold the table for the sampled duration.
    ///
    /// # Arguments
    ///
    /// * `guest` - Name of the seated guest
    /// * `table` - Table the guest occupies
    /// * `hold` - Holding time sampled from the guest's policy at seat time
    async fn occupy(&self, guest: &str, table: TableNumber, hold: Duration);
}

/// Default occupancy: sleep for the sampled holding time.
#[derive(Debug, Clone, Copy, Default)]
pub struct DiningOccupancy;

#[async_trait]
impl Occupancy for DiningOccupancy {
    async fn occupy(&self, guest: &str, table: TableNumber, hold: Duration) {
        tracing::info!("{guest} dines at table {table} for {}ms", hold.as_millis());
        tokio::time::sleep(hold).await;
    }
}
