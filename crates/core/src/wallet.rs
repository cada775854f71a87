//! Wallet and staking status as reported by the daemon.

use crate::Amount;
use serde::{Deserialize, Serialize};

/// Subset of `getwalletinfo` used by the monitor. Unknown fields are ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WalletInfo {
    /// Liquid balance
    pub balance: Amount,
    /// Amount currently staked, including immature rewards
    pub stake: Amount,
    /// Epoch seconds until which the wallet stays unlocked, 0 when locked.
    /// Absent for unencrypted wallets.
    #[serde(default)]
    pub unlocked_until: Option<i64>,
}

impl WalletInfo {
    pub fn new(balance: Amount, stake: Amount, unlocked_until: Option<i64>) -> Self {
        Self {
            balance,
            stake,
            unlocked_until,
        }
    }

    /// True when there is neither a balance nor a stake to watch.
    pub fn is_empty(&self) -> bool {
        self.balance.is_zero() && self.stake.is_zero()
    }

    /// An encrypted wallet reports `unlocked_until == 0` while locked.
    pub fn is_locked(&self) -> bool {
        self.unlocked_until == Some(0)
    }
}

/// Subset of `getstakinginfo` used by the monitor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StakingInfo {
    pub enabled: bool,
    pub staking: bool,
    /// Daemon error text, empty when healthy
    #[serde(default)]
    pub errors: String,
}

impl StakingInfo {
    pub fn new(enabled: bool, staking: bool) -> Self {
        Self {
            enabled,
            staking,
            errors: String::new(),
        }
    }

    pub fn with_errors(mut self, errors: impl Into<String>) -> Self {
        self.errors = errors.into();
        self
    }

    /// Daemon-reported error text, if any.
    pub fn error_text(&self) -> Option<&str> {
        let trimmed = self.errors.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed)
        }
    }
}
