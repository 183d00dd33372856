//! In-memory FIFO wait queue.

use std::collections::{HashSet, VecDeque};

use crate::core::{Guest, SeatingError, WaitQueue};

/// In-memory queue storing waiting guests in arrival order.
/// O(1) enqueue, dequeue and membership checks.
#[derive(Debug, Default)]
pub struct InMemoryWaitQueue {
    guests: VecDeque<Guest>,
    /// Names currently waiting, for duplicate rejection.
    members: HashSet<String>,
}

impl InMemoryWaitQueue {
    /// Create an empty queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty queue with room for `capacity` guests.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            guests: VecDeque::with_capacity(capacity),
            members: HashSet::with_capacity(capacity),
        }
    }
}

impl WaitQueue for InMemoryWaitQueue {
    fn enqueue(&mut self, guest: Guest) -> Result<(), SeatingError> {
        if !self.members.insert(guest.name().to_string()) {
            return Err(SeatingError::invariant(format!(
                "{} enqueued while already waiting",
                guest.name()
            )));
        }
        self.guests.push_back(guest);
        Ok(())
    }

    fn dequeue(&mut self) -> Option<Guest> {
        let guest = self.guests.pop_front()?;
        self.members.remove(guest.name());
        Some(guest)
    }

    fn contains(&self, name: &str) -> bool {
        self.members.contains(name)
    }

    fn names(&self) -> Vec<String> {
        self.guests.iter().map(|g| g.name().to_string()).collect()
    }

    fn len(&self) -> usize {
        self.guests.len()
    }
}
