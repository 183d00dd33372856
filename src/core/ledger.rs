//! Bank ledger sharing one balance between concurrent depositors and withdrawers.
//!
//! Every balance check-and-update happens under a single lock, the same
//! discipline [`TablePool`](crate::core::TablePool) applies to its tables.

use std::ops::RangeInclusive;
use std::thread;
use std::time::Duration;

use parking_lot::Mutex;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::SeatingError;

/// Counters describing ledger activity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerStats {
    /// Current balance.
    pub balance: u64,
    /// Accepted deposits.
    pub deposits: u64,
    /// Accepted withdrawals.
    pub withdrawals: u64,
    /// Withdrawals rejected for insufficient funds.
    pub rejected: u64,
}

/// Shared balance guarded by one mutex.
#[derive(Debug, Default)]
pub struct Ledger {
    state: Mutex<LedgerStats>,
}

impl Ledger {
    /// Empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Ledger with an opening balance.
    pub fn with_balance(balance: u64) -> Self {
        Self {
            state: Mutex::new(LedgerStats {
                balance,
                ..LedgerStats::default()
            }),
        }
    }

    /// Current balance.
    pub fn balance(&self) -> u64 {
        self.state.lock().balance
    }

    /// Snapshot of the counters.
    pub fn stats(&self) -> LedgerStats {
        *self.state.lock()
    }

    /// Add `amount`, returning the new balance.
    pub fn deposit(&self, amount: u64) -> u64 {
        let mut state = self.state.lock();
        state.balance = state.balance.saturating_add(amount);
        state.deposits += 1;
        tracing::info!("deposit {amount}, balance {}", state.balance);
        state.balance
    }

    /// Withdraw `amount` if the balance covers it, returning the new balance.
    /// A rejected withdrawal leaves the balance unchanged.
    pub fn take(&self, amount: u64) -> Result<u64, SeatingError> {
        let mut state = self.state.lock();
        if amount > state.balance {
            state.rejected += 1;
            tracing::warn!("withdrawal of {amount} rejected, balance {}", state.balance);
            return Err(SeatingError::LedgerRejected {
                requested: amount,
                balance: state.balance,
            });
        }
        state.balance -= amount;
        state.withdrawals += 1;
        tracing::info!("withdrawal {amount}, balance {}", state.balance);
        Ok(state.balance)
    }

    /// Perform `transactions` deposits of random amounts from `amounts`, pausing
    /// `pause` between them. Returns the total deposited.
    pub fn deposit_batch(
        &self,
        transactions: usize,
        amounts: RangeInclusive<u64>,
        pause: Duration,
    ) -> u64 {
        let mut rng = rand::rng();
        let mut total: u64 = 0;
        for _ in 0..transactions {
            let amount = rng.random_range(amounts.clone());
            self.deposit(amount);
            total = total.saturating_add(amount);
            pause_between(pause);
        }
        total
    }

    /// Attempt `transactions` withdrawals of random amounts from `amounts`,
    /// pausing `pause` between them. Returns how many were accepted.
    pub fn take_batch(
        &self,
        transactions: usize,
        amounts: RangeInclusive<u64>,
        pause: Duration,
    ) -> usize {
        let mut rng = rand::rng();
        let mut accepted = 0;
        for _ in 0..transactions {
            let amount = rng.random_range(amounts.clone());
            tracing::debug!("withdrawal request for {amount}");
            if self.take(amount).is_ok() {
                accepted += 1;
            }
            pause_between(pause);
        }
        accepted
    }
}

fn pause_between(pause: Duration) {
    if !pause.is_zero() {
        thread::sleep(pause);
    }
}
