//! Persisted wallet snapshot used to detect change between runs.

use crate::{Amount, WalletInfo};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// State recorded at the end of a run.
///
/// Fields are private so `total_balance` can only be computed from
/// `balance` and `stake`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    initial_balance: Amount,
    balance: Amount,
    stake: Amount,
    total_balance: Amount,
    /// Epoch seconds of the most recent stake increase, 0 if never seen
    last_block_time_won: i64,
    date: NaiveDate,
}

impl Snapshot {
    /// Build a snapshot from fresh wallet figures for the given calendar day.
    pub fn new(balance: Amount, stake: Amount, date: NaiveDate) -> Self {
        Self {
            initial_balance: Amount::ZERO,
            balance,
            stake,
            total_balance: balance + stake,
            last_block_time_won: 0,
            date,
        }
    }

    pub fn observe(wallet: &WalletInfo, date: NaiveDate) -> Self {
        Self::new(wallet.balance, wallet.stake, date)
    }

    /// Record the current balance as the baseline. Used on first run only.
    pub fn with_initial_balance_from_current(mut self) -> Self {
        self.initial_balance = self.balance;
        self
    }

    /// Copy the write-once fields from the previous run.
    pub fn carry_forward(mut self, prior: &Snapshot) -> Self {
        self.initial_balance = prior.initial_balance;
        self.last_block_time_won = prior.last_block_time_won;
        self
    }

    pub fn mark_block_won(&mut self, epoch_secs: i64) {
        self.last_block_time_won = epoch_secs;
    }

    pub fn initial_balance(&self) -> Amount {
        self.initial_balance
    }

    pub fn balance(&self) -> Amount {
        self.balance
    }

    pub fn stake(&self) -> Amount {
        self.stake
    }

    pub fn total_balance(&self) -> Amount {
        self.total_balance
    }

    pub fn last_block_time_won(&self) -> i64 {
        self.last_block_time_won
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    /// Whether `total_balance == balance + stake`. Files written by hand may not hold this.
    pub fn is_consistent(&self) -> bool {
        self.total_balance == self.balance + self.stake
    }
}
