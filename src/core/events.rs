//! Event log sinks.
//!
//! The pool emits one [`SeatingEvent`] per lifecycle transition while holding its
//! state lock, so the order of recorded events is the order of the transitions.

use std::collections::VecDeque;
use std::fmt;
use std::sync::Arc;

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

use super::TableNumber;
use crate::util::clock::now_ms;

/// Kind of lifecycle transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeatingEventKind {
    /// Guest entered the wait queue.
    Queued,
    /// Guest took a table.
    Seated,
    /// Guest left its table.
    Departed,
    /// Coordinator closed the cafe.
    Closed,
}

/// Event structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeatingEvent {
    /// Event identifier.
    pub event_id: String,
    /// Transition kind.
    pub kind: SeatingEventKind,
    /// Guest involved, if any.
    pub guest: Option<String>,
    /// Table involved, if any.
    pub table: Option<TableNumber>,
    /// Timestamp milliseconds.
    pub created_at_ms: u128,
    /// Additional context.
    pub detail: Option<String>,
}

impl fmt::Display for SeatingEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let guest = self.guest.as_deref().unwrap_or("?");
        match (self.kind, self.table) {
            (SeatingEventKind::Queued, _) => write!(f, "{guest} is waiting in line"),
            (SeatingEventKind::Seated, Some(t)) => write!(f, "{guest} sat down at table {t}"),
            (SeatingEventKind::Departed, Some(t)) => {
                write!(f, "{guest} finished and left, table {t} is free")
            }
            (SeatingEventKind::Closed, _) => write!(f, "cafe closed, every guest has left"),
            (kind, None) => write!(f, "{guest}: {kind:?}"),
        }
    }
}

/// Event sink abstraction.
pub trait EventSink: Send {
    /// Record an event.
    fn record(&mut self, event: SeatingEvent);
}

/// Sink handle shared between the pool and the coordinator.
pub type SharedEventSink = Arc<Mutex<Box<dyn EventSink>>>;

/// Wrap a sink for sharing.
pub fn share_sink(sink: impl EventSink + 'static) -> SharedEventSink {
    Arc::new(Mutex::new(Box::new(sink)))
}

/// In-memory sink with a bounded buffer. Clones share the same buffer.
#[derive(Clone)]
pub struct InMemoryEventSink {
    events: Arc<Mutex<VecDeque<SeatingEvent>>>,
    max_events: usize,
}

impl InMemoryEventSink {
    /// Create a new in-memory sink with a bounded buffer.
    pub fn new(max_events: usize) -> Self {
        Self {
            events: Arc::new(Mutex::new(VecDeque::with_capacity(max_events.min(1024)))),
            max_events,
        }
    }

    /// Retrieve a snapshot of stored events.
    pub fn events(&self) -> Vec<SeatingEvent> {
        self.events.lock().iter().cloned().collect()
    }

    /// Guests in the order they were seated.
    pub fn seating_order(&self) -> Vec<String> {
        self.events
            .lock()
            .iter()
            .filter(|e| e.kind == SeatingEventKind::Seated)
            .filter_map(|e| e.guest.clone())
            .collect()
    }
}

impl EventSink for InMemoryEventSink {
    fn record(&mut self, event: SeatingEvent) {
        let mut events = self.events.lock();
        if events.len() >= self.max_events {
            events.pop_front();
        }
        events.push_back(event);
    }
}

/// Sink that writes human-readable lines through `tracing`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingEventSink;

impl EventSink for TracingEventSink {
    fn record(&mut self, event: SeatingEvent) {
        tracing::info!(kind = ?event.kind, "{event}");
    }
}

/// Helper to build an event stamped with a fresh id and the current time.
pub fn build_event(
    kind: SeatingEventKind,
    guest: Option<&str>,
    table: Option<TableNumber>,
    detail: Option<String>,
) -> SeatingEvent {
    SeatingEvent {
        event_id: uuid::Uuid::new_v4().to_string(),
        kind,
        guest: guest.map(str::to_string),
        table,
        created_at_ms: now_ms(),
        detail,
    }
}
