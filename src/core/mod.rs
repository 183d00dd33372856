//! Core seating abstractions: tables, guests, the pool and its coordinator.

pub mod coordinator;
pub mod error;
pub mod events;
pub mod guest;
pub mod ledger;
pub mod occupancy;
pub mod report;
pub mod table;
pub mod table_pool;

pub use coordinator::{Coordinator, CoordinatorState, DepartureOutcome};
pub use error::{AppResult, ConfigError, SeatingError};
pub use events::{
    build_event, share_sink, EventSink, InMemoryEventSink, SeatingEvent, SeatingEventKind,
    SharedEventSink, TracingEventSink,
};
pub use guest::{Departure, Guest, GuestPhase, GuestProfile, HoldPolicy};
pub use ledger::{Ledger, LedgerStats};
pub use occupancy::{DiningOccupancy, Occupancy};
pub use report::{ClosureReport, ServiceRecord};
pub use table::{Table, TableNumber, TableView};
pub use table_pool::{PoolSnapshot, Spawn, TablePool, WaitQueue};
