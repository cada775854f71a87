//! Conditions under which a run stops before comparing snapshots.

use stake_core::{Event, StakingInfo, WalletInfo};

/// First failing wallet/staking condition, checked in a fixed order:
/// no funds, daemon errors, locked wallet, staking disabled, not yet staking.
pub fn halt_reason(wallet: &WalletInfo, staking: &StakingInfo) -> Option<Event> {
    if wallet.is_empty() {
        return Some(Event::NoBalance);
    }
    if let Some(errors) = staking.error_text() {
        return Some(Event::StakingError(errors.to_string()));
    }
    if wallet.is_locked() {
        return Some(Event::Locked);
    }
    if !staking.enabled {
        return Some(Event::StakingDisabled);
    }
    if !staking.staking {
        return Some(Event::NotYetStaking);
    }
    None
}

/// Advisory warning when a reading is strictly above the threshold.
pub fn temperature_warning(celsius: f64, threshold: f64) -> Option<Event> {
    (celsius > threshold).then_some(Event::TemperatureWarning { celsius, threshold })
}
