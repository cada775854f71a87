//! Notification events raised by a monitor run.

use crate::Amount;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Something the operator should hear about.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Event {
    /// The daemon CLI could not be run or returned unreadable output
    QueryFailed { command: String, reason: String },
    /// Neither balance nor stake is present
    NoBalance,
    /// The daemon reported an error string
    StakingError(String),
    /// Encrypted wallet is locked, so it cannot stake
    Locked,
    StakingDisabled,
    /// Staking is enabled but the wallet is not staking yet
    NotYetStaking,
    TemperatureWarning { celsius: f64, threshold: f64 },
    /// First snapshot written. `reinitialized` is set when an unreadable state file was replaced.
    Initialized { reinitialized: bool },
    /// Stake increased since the previous run
    StakeEarned { balance: Amount, stake: Amount },
    /// Unconditional status report
    Status { balance: Amount, stake: Amount },
    /// First run on a new calendar day
    DailySummary {
        date: NaiveDate,
        total_balance: Amount,
        stake: Amount,
    },
}

impl Event {
    /// Short stable name, used in log fields.
    pub fn kind(&self) -> &'static str {
        match self {
            Event::QueryFailed { .. } => "query_failed",
            Event::NoBalance => "no_balance",
            Event::StakingError(_) => "staking_error",
            Event::Locked => "locked",
            Event::StakingDisabled => "staking_disabled",
            Event::NotYetStaking => "not_yet_staking",
            Event::TemperatureWarning { .. } => "temperature_warning",
            Event::Initialized { .. } => "initialized",
            Event::StakeEarned { .. } => "stake_earned",
            Event::Status { .. } => "status",
            Event::DailySummary { .. } => "daily_summary",
        }
    }
}
