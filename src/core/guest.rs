//! Guests: independently executing occupants of a single table.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use rand::Rng;
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc::UnboundedSender;

use super::{ConfigError, Occupancy, SeatingError, ServiceRecord, Spawn, TableNumber};
use crate::util::clock::millis;

/// How long a guest holds a table once seated. Selected at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HoldPolicy {
    /// Always the same duration.
    Fixed(Duration),
    /// Uniformly sampled from an inclusive range.
    Uniform {
        /// Shortest holding time.
        min: Duration,
        /// Longest holding time.
        max: Duration,
    },
}

impl HoldPolicy {
    /// Build a policy from millisecond bounds, collapsing equal bounds to `Fixed`.
    pub fn from_millis(min_ms: u64, max_ms: u64) -> Result<Self, ConfigError> {
        if min_ms == 0 || min_ms > max_ms {
            return Err(ConfigError::InvalidHoldRange { min_ms, max_ms });
        }
        if min_ms == max_ms {
            return Ok(Self::Fixed(Duration::from_millis(min_ms)));
        }
        Ok(Self::Uniform {
            min: Duration::from_millis(min_ms),
            max: Duration::from_millis(max_ms),
        })
    }

    /// Reject zero or inverted bounds.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let (min, max) = match *self {
            Self::Fixed(d) => (d, d),
            Self::Uniform { min, max } => (min, max),
        };
        if min.is_zero() || min > max {
            return Err(ConfigError::InvalidHoldRange {
                min_ms: millis(min),
                max_ms: millis(max),
            });
        }
        Ok(())
    }

    /// Draw a holding time.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Duration {
        match *self {
            Self::Fixed(d) => d,
            Self::Uniform { min, max } => rng.random_range(min..=max),
        }
    }
}

/// Arrival input: identity plus holding-time configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuestProfile {
    /// Unique guest name.
    pub name: String,
    /// Holding-time policy.
    pub hold: HoldPolicy,
}

impl GuestProfile {
    /// Create a profile.
    pub fn new(name: impl Into<String>, hold: HoldPolicy) -> Self {
        Self {
            name: name.into(),
            hold,
        }
    }

    /// Check name and holding bounds.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.name.trim().is_empty() {
            return Err(ConfigError::EmptyGuestName);
        }
        self.hold.validate()
    }
}

/// Lifecycle phase of a guest as seen by the pool. Transitions only move forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GuestPhase {
    /// In the wait queue.
    Waiting,
    /// Occupying the given table.
    Seated(TableNumber),
    /// Finished and released its table.
    Departed,
}

/// Completion signal sent by a guest's task after it marks itself departed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Departure {
    /// Table the guest occupied.
    pub table: TableNumber,
    /// Departing guest.
    pub guest: String,
}

#[derive(Debug, Clone, Copy)]
struct Seating {
    table: TableNumber,
    order: u64,
    seated_at: Instant,
    hold: Duration,
}

/// A guest tracked by the pool from arrival until its departure is reconciled.
#[derive(Debug)]
pub struct Guest {
    profile: GuestProfile,
    arrived_at: Instant,
    queued: bool,
    seating: Option<Seating>,
    departed: Arc<AtomicBool>,
}

impl Guest {
    /// Record an arrival now.
    pub fn arrive(profile: GuestProfile) -> Result<Self, ConfigError> {
        profile.validate()?;
        Ok(Self {
            profile,
            arrived_at: Instant::now(),
            queued: false,
            seating: None,
            departed: Arc::new(AtomicBool::new(false)),
        })
    }

    /// Guest name.
    pub fn name(&self) -> &str {
        &self.profile.name
    }

    /// Table currently held, if seated.
    pub fn table(&self) -> Option<TableNumber> {
        self.seating.map(|s| s.table)
    }

    /// True once the occupancy future has finished. Never reverts.
    pub fn has_departed(&self) -> bool {
        self.departed.load(Ordering::Acquire)
    }

    pub(crate) fn mark_queued(&mut self) {
        self.queued = true;
    }

    /// Begin independent occupancy of `table`.
    ///
    /// Samples the holding time, spawns the occupancy future and returns the
    /// sampled duration. The spawned task flips the departed flag and then sends a
    /// [`Departure`] on `departures`; it never touches pool state.
    pub(crate) fn seat<O, S>(
        &mut self,
        table: TableNumber,
        order: u64,
        occupancy: &O,
        spawner: &S,
        departures: UnboundedSender<Departure>,
    ) -> Result<Duration, SeatingError>
    where
        O: Occupancy,
        S: Spawn,
    {
        if let Some(current) = self.seating {
            return Err(SeatingError::invariant(format!(
                "{} seated at table {table} while already seated at table {}",
                self.profile.name, current.table
            )));
        }
        if self.has_departed() {
            return Err(SeatingError::invariant(format!(
                "{} seated at table {table} after departing",
                self.profile.name
            )));
        }

        let hold = self.profile.hold.sample(&mut rand::rng());
        self.seating = Some(Seating {
            table,
            order,
            seated_at: Instant::now(),
            hold,
        });

        let name = self.profile.name.clone();
        let departed = Arc::clone(&self.departed);
        let occupancy = occupancy.clone();
        spawner.spawn(async move {
            occupancy.occupy(&name, table, hold).await;
            departed.store(true, Ordering::Release);
            tracing::debug!("{name} finished at table {table}");
            if departures.send(Departure { table, guest: name }).is_err() {
                tracing::debug!("departure receiver dropped before table {table} was reconciled");
            }
        });

        Ok(hold)
    }

    /// Close out a departed guest into its service record.
    pub(crate) fn into_record(self) -> Result<ServiceRecord, SeatingError> {
        let Some(seating) = self.seating else {
            return Err(SeatingError::invariant(format!(
                "{} released without ever being seated",
                self.profile.name
            )));
        };
        Ok(ServiceRecord {
            guest: self.profile.name,
            table: seating.table,
            seat_order: seating.order,
            queued: self.queued,
            waited_ms: millis(seating.seated_at.saturating_duration_since(self.arrived_at)),
            held_ms: millis(seating.hold),
        })
    }
}
