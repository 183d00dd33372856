//! Coordinator: drives arrivals, departures and closure of a [`TablePool`].
//!
//! Departures are observed through the completion channel returned by
//! [`TablePool::new`]; the coordinator suspends on that channel instead of
//! re-checking guests on a timer. Closure happens only after every admitted
//! guest's departure has been received and reconciled.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use tokio::sync::{mpsc, watch};

use crate::core::events::{build_event, SeatingEventKind};
use crate::core::{
    ClosureReport, ConfigError, Departure, GuestPhase, GuestProfile, Occupancy, SeatingError,
    Spawn, TablePool, WaitQueue,
};
use crate::util::clock::now_ms;

/// Coordinator lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CoordinatorState {
    /// Accepting arrivals.
    Open,
    /// No more arrivals; waiting for quiescence.
    Draining,
    /// Terminal; closure already reported.
    Closed,
}

/// Result of reconciling one departure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DepartureOutcome {
    /// Departure signal that was processed.
    pub departure: Departure,
    /// Guest seated at the freed table from the wait queue.
    pub reseated: Option<String>,
}

/// Drives a pool from first arrival to closure.
pub struct Coordinator<Q, O, S> {
    pool: TablePool<Q, O, S>,
    departures: mpsc::UnboundedReceiver<Departure>,
    state: CoordinatorState,
    admitted: usize,
    departed: usize,
    rejected: Vec<String>,
}

impl<Q, O, S> Coordinator<Q, O, S>
where
    Q: WaitQueue,
    O: Occupancy,
    S: Spawn,
{
    /// Take ownership of a pool and its departure receiver.
    pub const fn new(
        pool: TablePool<Q, O, S>,
        departures: mpsc::UnboundedReceiver<Departure>,
    ) -> Self {
        Self {
            pool,
            departures,
            state: CoordinatorState::Open,
            admitted: 0,
            departed: 0,
            rejected: Vec::new(),
        }
    }

    /// Current lifecycle state.
    pub const fn state(&self) -> CoordinatorState {
        self.state
    }

    /// Underlying pool, for snapshots and quiescence checks.
    pub const fn pool(&self) -> &TablePool<Q, O, S> {
        &self.pool
    }

    /// Guests admitted but whose departure has not been reconciled yet.
    pub const fn outstanding(&self) -> usize {
        self.admitted - self.departed
    }

    /// Admit one guest. Only valid while `Open`.
    pub fn arrive(&mut self, profile: GuestProfile) -> Result<GuestPhase, SeatingError> {
        if self.state != CoordinatorState::Open {
            return Err(SeatingError::protocol(format!(
                "{} arrived while the cafe is {:?}",
                profile.name, self.state
            )));
        }
        let phase = self.pool.arrive(profile)?;
        self.admitted += 1;
        Ok(phase)
    }

    /// Admit a batch in order.
    ///
    /// The whole batch is validated first: every profile must be well formed and
    /// every name unique, both within the batch and against guests the pool has
    /// already seen. On failure nobody from the batch is admitted.
    pub fn admit<I>(&mut self, guests: I) -> Result<(), SeatingError>
    where
        I: IntoIterator<Item = GuestProfile>,
    {
        if self.state != CoordinatorState::Open {
            return Err(SeatingError::protocol(format!(
                "batch submitted while the cafe is {:?}",
                self.state
            )));
        }
        let batch: Vec<GuestProfile> = guests.into_iter().collect();
        self.validate_batch(&batch)?;
        for profile in batch {
            self.arrive(profile)?;
        }
        Ok(())
    }

    fn validate_batch(&self, batch: &[GuestProfile]) -> Result<(), ConfigError> {
        let mut names = HashSet::with_capacity(batch.len());
        for profile in batch {
            profile.validate()?;
            if !names.insert(profile.name.as_str()) || self.pool.phase_of(&profile.name).is_some()
            {
                tracing::warn!("batch rejected, {} appears more than once", profile.name);
                return Err(ConfigError::DuplicateGuest(profile.name.clone()));
            }
        }
        Ok(())
    }

    /// Stop accepting arrivals (`Open` -> `Draining`).
    pub fn begin_draining(&mut self) -> Result<(), SeatingError> {
        if self.state != CoordinatorState::Open {
            return Err(SeatingError::protocol(format!(
                "cannot start draining from {:?}",
                self.state
            )));
        }
        tracing::info!(
            "arrivals closed, waiting for {} guest(s) to leave",
            self.outstanding()
        );
        self.state = CoordinatorState::Draining;
        Ok(())
    }

    /// Wait for the next departure signal and reconcile it with the pool.
    ///
    /// Returns `Ok(None)` when no admitted guest is still outstanding.
    pub async fn next_departure(&mut self) -> Result<Option<DepartureOutcome>, SeatingError> {
        if self.outstanding() == 0 {
            return Ok(None);
        }
        let departure = self.departures.recv().await.ok_or_else(|| {
            SeatingError::invariant(format!(
                "departure channel closed with {} guest(s) outstanding",
                self.outstanding()
            ))
        })?;
        self.reconcile(departure).map(Some)
    }

    /// Wait until every admitted guest has left, then close and report.
    ///
    /// Moves `Open` to `Draining` first if needed. Fails with a protocol
    /// violation once closed.
    pub async fn drain(&mut self) -> Result<ClosureReport, SeatingError> {
        match self.state {
            CoordinatorState::Closed => {
                return Err(SeatingError::protocol("closure was already reported"))
            }
            CoordinatorState::Open => self.begin_draining()?,
            CoordinatorState::Draining => {}
        }

        while self.next_departure().await?.is_some() {}

        if !self.pool.is_quiescent() {
            return Err(SeatingError::invariant(
                "every guest departed but the pool is not quiescent",
            ));
        }
        Ok(self.close())
    }

    /// Admit a batch, drain and close.
    pub async fn run<I>(mut self, guests: I) -> Result<ClosureReport, SeatingError>
    where
        I: IntoIterator<Item = GuestProfile>,
    {
        self.admit(guests)?;
        self.drain().await
    }

    /// Serve a stream of arrivals until the stream ends or `shutdown` turns true,
    /// then drain gracefully.
    ///
    /// Seated guests always finish their holding time; only new arrivals stop.
    /// Arrivals rejected as protocol violations (e.g. a repeated name) are
    /// listed in the report instead of aborting the run. Once serving stops the
    /// arrival channel is closed, so later sends fail, and profiles still
    /// buffered in it are listed as rejected too.
    pub async fn serve(
        &mut self,
        mut arrivals: mpsc::Receiver<GuestProfile>,
        mut shutdown: watch::Receiver<bool>,
    ) -> Result<ClosureReport, SeatingError> {
        if *shutdown.borrow_and_update() {
            tracing::info!("shutdown requested before serving");
            self.reject_buffered(&mut arrivals);
            return self.drain().await;
        }

        let mut watching = true;
        loop {
            tokio::select! {
                biased;
                changed = shutdown.changed(), if watching => match changed {
                    Ok(()) if *shutdown.borrow_and_update() => {
                        tracing::info!("shutdown signal received, no more arrivals");
                        break;
                    }
                    Ok(()) => {}
                    // Sender gone: nobody can request shutdown any more.
                    Err(_) => watching = false,
                },
                Some(departure) = self.departures.recv(), if self.outstanding() > 0 => {
                    self.reconcile(departure)?;
                }
                arrival = arrivals.recv() => match arrival {
                    Some(profile) => self.accept_streamed(profile)?,
                    None => break,
                },
            }
        }

        self.reject_buffered(&mut arrivals);
        self.drain().await
    }

    fn reject_buffered(&mut self, arrivals: &mut mpsc::Receiver<GuestProfile>) {
        arrivals.close();
        while let Ok(profile) = arrivals.try_recv() {
            tracing::warn!("{} arrived after arrivals closed, rejected", profile.name);
            self.rejected.push(profile.name);
        }
    }

    fn accept_streamed(&mut self, profile: GuestProfile) -> Result<(), SeatingError> {
        let name = profile.name.clone();
        match self.arrive(profile) {
            Ok(_) => Ok(()),
            Err(SeatingError::ProtocolViolation(_) | SeatingError::Configuration(_)) => {
                self.rejected.push(name);
                Ok(())
            }
            Err(e) => Err(e),
        }
    }

    fn reconcile(&mut self, departure: Departure) -> Result<DepartureOutcome, SeatingError> {
        tracing::debug!("{} signalled departure from table {}", departure.guest, departure.table);
        let reseated = self.pool.notify_departure(departure.table, &departure.guest)?;
        self.departed += 1;
        Ok(DepartureOutcome {
            departure,
            reseated,
        })
    }

    fn close(&mut self) -> ClosureReport {
        self.state = CoordinatorState::Closed;
        let records = self.pool.take_records();
        if let Some(sink) = self.pool.events() {
            sink.lock().record(build_event(
                SeatingEventKind::Closed,
                None,
                None,
                Some(format!("{} guest(s) served", records.len())),
            ));
        }
        tracing::info!("cafe closed, all {} guest(s) have left", records.len());
        ClosureReport {
            tables: self.pool.capacity(),
            served: records.len(),
            records,
            rejected: std::mem::take(&mut self.rejected),
            closed_at_ms: now_ms(),
        }
    }
}
