//! Tables: fixed units of capacity holding at most one guest.

use serde::{Deserialize, Serialize};

use super::{Guest, SeatingError};

/// Stable table identity, numbered from 1.
pub type TableNumber = u32;

/// A single table. Created with the pool and never destroyed while it lives.
#[derive(Debug)]
pub struct Table {
    number: TableNumber,
    occupant: Option<Guest>,
}

impl Table {
    /// Create a free table.
    pub const fn new(number: TableNumber) -> Self {
        Self {
            number,
            occupant: None,
        }
    }

    /// Table identity.
    pub const fn number(&self) -> TableNumber {
        self.number
    }

    /// True when nobody is seated.
    pub const fn is_free(&self) -> bool {
        self.occupant.is_none()
    }

    /// Current occupant, if any.
    pub const fn occupant(&self) -> Option<&Guest> {
        self.occupant.as_ref()
    }

    pub(crate) fn assign(&mut self, guest: Guest) -> Result<(), SeatingError> {
        if let Some(current) = &self.occupant {
            return Err(SeatingError::invariant(format!(
                "table {} assigned to {} while occupied by {}",
                self.number,
                guest.name(),
                current.name()
            )));
        }
        self.occupant = Some(guest);
        Ok(())
    }

    pub(crate) fn release(&mut self) -> Result<Guest, SeatingError> {
        self.occupant
            .take()
            .ok_or_else(|| SeatingError::invariant(format!("table {} is already free", self.number)))
    }

    /// Owned view for snapshots.
    pub fn view(&self) -> TableView {
        TableView {
            number: self.number,
            occupant: self.occupant.as_ref().map(|g| g.name().to_string()),
        }
    }
}

/// Point-in-time view of one table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableView {
    /// Table identity.
    pub number: TableNumber,
    /// Seated guest name.
    pub occupant: Option<String>,
}
