//! Table pool: fixed set of tables plus a FIFO wait queue behind one lock.

use std::collections::HashMap;
use std::future::Future;

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

use crate::core::events::{build_event, SeatingEventKind, SharedEventSink};
use crate::core::{
    ConfigError, Departure, Guest, GuestPhase, GuestProfile, Occupancy, SeatingError,
    ServiceRecord, Table, TableNumber, TableView,
};

/// Abstraction for the wait-queue backend.
///
/// Guests leave in exactly the order they entered. A guest already waiting must
/// not be enqueued again.
pub trait WaitQueue {
    /// Append a guest at the tail.
    fn enqueue(&mut self, guest: Guest) -> Result<(), SeatingError>;
    /// Remove the guest at the head.
    fn dequeue(&mut self) -> Option<Guest>;
    /// Whether a guest with this name is waiting.
    fn contains(&self, name: &str) -> bool;
    /// Waiting guest names, head first.
    fn names(&self) -> Vec<String>;
    /// Current depth.
    fn len(&self) -> usize;
    /// True when nobody is waiting.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Abstraction for spawning guest occupancy on a runtime.
pub trait Spawn {
    /// Spawn an async task that returns a future.
    fn spawn<F>(&self, fut: F)
    where
        F: Future<Output = ()> + Send + 'static;
}

/// Consistent point-in-time view of the pool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolSnapshot {
    /// Every table, lowest number first.
    pub tables: Vec<TableView>,
    /// Waiting guests, head first.
    pub waiting: Vec<String>,
}

impl PoolSnapshot {
    /// Number of occupied tables.
    pub fn seated(&self) -> usize {
        self.tables.iter().filter(|t| t.occupant.is_some()).count()
    }

    /// Occupant of a table.
    pub fn occupant(&self, table: TableNumber) -> Option<&str> {
        self.tables
            .iter()
            .find(|t| t.number == table)
            .and_then(|t| t.occupant.as_deref())
    }

    /// True when no table is occupied and nobody waits.
    pub fn is_quiescent(&self) -> bool {
        self.waiting.is_empty() && self.seated() == 0
    }
}

struct PoolState<Q> {
    tables: Vec<Table>,
    queue: Q,
    phases: HashMap<String, GuestPhase>,
    served: Vec<ServiceRecord>,
    seat_sequence: u64,
}

impl<Q: WaitQueue> PoolState<Q> {
    fn lowest_free_table(&self) -> Option<usize> {
        self.tables.iter().position(Table::is_free)
    }

    fn table_index(&self, table: TableNumber) -> Option<usize> {
        self.tables.iter().position(|t| t.number() == table)
    }

    fn is_quiescent(&self) -> bool {
        self.queue.is_empty() && self.tables.iter().all(Table::is_free)
    }
}

/// Fixed-capacity table pool.
///
/// All reads and writes of table occupancy and the wait queue happen inside a
/// single `parking_lot::Mutex` critical section: checking for a free table,
/// assigning it and popping the head waiter are one indivisible step. Guests
/// never touch this state; they flip their own departed flag and send a
/// [`Departure`], which the coordinator reconciles via [`TablePool::notify_departure`].
pub struct TablePool<Q, O, S> {
    state: Mutex<PoolState<Q>>,
    occupancy: O,
    spawner: S,
    departures: UnboundedSender<Departure>,
    events: Option<SharedEventSink>,
}

impl<Q, O, S> TablePool<Q, O, S>
where
    Q: WaitQueue,
    O: Occupancy,
    S: Spawn,
{
    /// Create a pool with tables numbered `1..=table_count`.
    ///
    /// Returns the pool together with the receiver on which seated guests signal
    /// their departure.
    pub fn new(
        table_count: u32,
        queue: Q,
        occupancy: O,
        spawner: S,
    ) -> Result<(Self, UnboundedReceiver<Departure>), SeatingError> {
        if table_count == 0 {
            return Err(ConfigError::NoTables.into());
        }
        let (tx, rx) = mpsc::unbounded_channel();
        let pool = Self {
            state: Mutex::new(PoolState {
                tables: (1..=table_count).map(Table::new).collect(),
                queue,
                phases: HashMap::new(),
                served: Vec::new(),
                seat_sequence: 0,
            }),
            occupancy,
            spawner,
            departures: tx,
            events: None,
        };
        tracing::debug!("table pool created with {table_count} tables");
        Ok((pool, rx))
    }

    /// Attach an event sink.
    #[must_use]
    pub fn with_events(mut self, events: SharedEventSink) -> Self {
        self.events = Some(events);
        self
    }

    /// Handle a guest arrival.
    ///
    /// Seats the guest at the lowest-numbered free table and starts its occupancy,
    /// or appends it to the wait queue when every table is taken.
    pub fn arrive(&self, profile: GuestProfile) -> Result<GuestPhase, SeatingError> {
        let mut guest = Guest::arrive(profile)?;
        let mut state = self.state.lock();

        if let Some(phase) = state.phases.get(guest.name()) {
            return Err(SeatingError::protocol(format!(
                "{} arrived again while {phase:?}",
                guest.name()
            )));
        }

        if let Some(idx) = state.lowest_free_table() {
            let table = self.seat_locked(&mut state, idx, guest)?;
            return Ok(GuestPhase::Seated(table));
        }

        guest.mark_queued();
        let name = guest.name().to_string();
        state.queue.enqueue(guest)?;
        state.phases.insert(name.clone(), GuestPhase::Waiting);
        self.record(SeatingEventKind::Queued, &name, None);
        tracing::info!("{name} is waiting, queue depth {}", state.queue.len());
        Ok(GuestPhase::Waiting)
    }

    /// Reconcile the departure of `guest` from `table`.
    ///
    /// Frees the table and, if anyone is waiting, seats the head of the queue
    /// there. Returns the name of the newly seated guest. A departure naming
    /// someone other than the current occupant is rejected without touching state.
    pub fn notify_departure(
        &self,
        table: TableNumber,
        guest: &str,
    ) -> Result<Option<String>, SeatingError> {
        let mut state = self.state.lock();
        let idx = state
            .table_index(table)
            .ok_or_else(|| SeatingError::invariant(format!("unknown table {table}")))?;

        match state.tables[idx].occupant() {
            None => {
                return Err(SeatingError::invariant(format!(
                    "departure reported for free table {table}"
                )))
            }
            Some(occupant) if occupant.name() != guest => {
                return Err(SeatingError::invariant(format!(
                    "{guest} reported leaving table {table}, which {} occupies",
                    occupant.name()
                )))
            }
            Some(occupant) if !occupant.has_departed() => {
                return Err(SeatingError::invariant(format!(
                    "departure reported for table {table} but {guest} is still seated"
                )))
            }
            Some(_) => {}
        }

        let departed = state.tables[idx].release()?;
        let name = departed.name().to_string();
        state.phases.insert(name.clone(), GuestPhase::Departed);
        let record = departed.into_record()?;
        state.served.push(record);
        self.record(SeatingEventKind::Departed, &name, Some(table));
        tracing::info!("{name} left, table {table} is free");

        let Some(next) = state.queue.dequeue() else {
            return Ok(None);
        };
        let next_name = next.name().to_string();
        self.seat_locked(&mut state, idx, next)?;
        Ok(Some(next_name))
    }

    /// True iff nobody waits and every table is free, read under the lock.
    pub fn is_quiescent(&self) -> bool {
        self.state.lock().is_quiescent()
    }

    /// Consistent view of tables and queue.
    pub fn snapshot(&self) -> PoolSnapshot {
        let state = self.state.lock();
        PoolSnapshot {
            tables: state.tables.iter().map(Table::view).collect(),
            waiting: state.queue.names(),
        }
    }

    /// Lifecycle phase of a guest that has arrived.
    pub fn phase_of(&self, guest: &str) -> Option<GuestPhase> {
        self.state.lock().phases.get(guest).copied()
    }

    /// Number of tables.
    pub fn capacity(&self) -> u32 {
        u32::try_from(self.state.lock().tables.len()).unwrap_or(u32::MAX)
    }

    /// Drain service records of reconciled departures, in seating order.
    pub fn take_records(&self) -> Vec<ServiceRecord> {
        let mut records = std::mem::take(&mut self.state.lock().served);
        records.sort_by_key(|r| r.seat_order);
        records
    }

    pub(crate) fn events(&self) -> Option<&SharedEventSink> {
        self.events.as_ref()
    }

    fn seat_locked(
        &self,
        state: &mut PoolState<Q>,
        idx: usize,
        mut guest: Guest,
    ) -> Result<TableNumber, SeatingError> {
        let table = state.tables[idx].number();
        if !state.tables[idx].is_free() {
            return Err(SeatingError::invariant(format!(
                "table {table} chosen for {} but occupied",
                guest.name()
            )));
        }
        if state.queue.contains(guest.name()) {
            return Err(SeatingError::invariant(format!(
                "{} seated while still waiting",
                guest.name()
            )));
        }

        state.seat_sequence += 1;
        let hold = guest.seat(
            table,
            state.seat_sequence,
            &self.occupancy,
            &self.spawner,
            self.departures.clone(),
        )?;
        let name = guest.name().to_string();
        state.tables[idx].assign(guest)?;
        state.phases.insert(name.clone(), GuestPhase::Seated(table));
        self.record(SeatingEventKind::Seated, &name, Some(table));
        tracing::info!("{name} seated at table {table} for {}ms", hold.as_millis());
        Ok(table)
    }

    fn record(&self, kind: SeatingEventKind, guest: &str, table: Option<TableNumber>) {
        if let Some(sink) = &self.events {
            sink.lock().record(build_event(kind, Some(guest), table, None));
        }
    }
}
