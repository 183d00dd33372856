//! Error types for seating operations.

use thiserror::Error;

/// Construction-time configuration failures. No pool is created when one is raised.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// The pool must have at least one table.
    #[error("table count must be greater than 0")]
    NoTables,
    /// A guest was configured without a name.
    #[error("guest name must not be empty")]
    EmptyGuestName,
    /// Two guests share the same name.
    #[error("duplicate guest name `{0}`")]
    DuplicateGuest(String),
    /// Holding-time bounds are zero or inverted.
    #[error("invalid holding range: min {min_ms}ms, max {max_ms}ms")]
    InvalidHoldRange {
        /// Lower bound in milliseconds.
        min_ms: u64,
        /// Upper bound in milliseconds.
        max_ms: u64,
    },
    /// Worker thread count was set to zero.
    #[error("worker_threads must be greater than 0")]
    NoWorkerThreads,
    /// Configuration source could not be read or parsed.
    #[error("parse error: {0}")]
    Parse(String),
}

/// Errors produced by the table pool, coordinator and ledger.
#[derive(Debug, Error)]
pub enum SeatingError {
    /// Invalid construction input.
    #[error("configuration error: {0}")]
    Configuration(#[from] ConfigError),
    /// Caller used an operation outside its contract (e.g. arrival after closing).
    #[error("protocol violation: {0}")]
    ProtocolViolation(String),
    /// Internal bookkeeping disagreed with itself; the operation was aborted.
    #[error("invariant violation: {0}")]
    InvariantViolation(String),
    /// Withdrawal larger than the current balance.
    #[error("withdrawal of {requested} rejected: balance is {balance}")]
    LedgerRejected {
        /// Amount requested.
        requested: u64,
        /// Balance at the time of the request.
        balance: u64,
    },
}

impl SeatingError {
    /// Build an invariant violation and log it at error level.
    pub(crate) fn invariant(message: impl Into<String>) -> Self {
        let message = message.into();
        tracing::error!("invariant violation: {message}");
        Self::InvariantViolation(message)
    }

    /// Build a protocol violation and log it at warn level.
    pub(crate) fn protocol(message: impl Into<String>) -> Self {
        let message = message.into();
        tracing::warn!("protocol violation: {message}");
        Self::ProtocolViolation(message)
    }
}

/// Application-facing result using anyhow for higher-level contexts.
pub type AppResult<T> = Result<T, anyhow::Error>;
