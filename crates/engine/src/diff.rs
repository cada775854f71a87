//! Snapshot comparison.
//!
//! Decides which events fire between two consecutive runs and builds the
//! snapshot that replaces the persisted one.

use serde::{Deserialize, Serialize};
use stake_core::{Event, Snapshot};

/// Configuration for the monitor's decisions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MonitorConfig {
    /// Send a balance/stake status on every run, not only on rewards.
    pub always_notify: bool,
    /// Send a summary on the first run of each calendar day.
    pub daily_status_update: bool,
    /// Query the temperature sensor and warn above the threshold.
    pub monitor_temperature: bool,
    /// Warning threshold in degrees Celsius.
    pub temperature_warning_threshold: f64,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            always_notify: false,
            daily_status_update: true,
            monitor_temperature: true,
            temperature_warning_threshold: 80.0,
        }
    }
}

/// Output of comparing a fresh snapshot against the previous one.
#[derive(Debug, Clone, PartialEq)]
pub struct Comparison {
    /// Snapshot to persist
    pub latest: Snapshot,
    /// Events to send, in order
    pub events: Vec<Event>,
}

/// Compare `latest` against `prior`.
///
/// The three checks are independent: a reward, the always-notify status and
/// the daily summary can all fire in one run. `initial_balance` and
/// `last_block_time_won` carry over from `prior` unless a reward is seen.
pub fn compare(
    prior: &Snapshot,
    latest: Snapshot,
    config: &MonitorConfig,
    now_epoch_secs: i64,
) -> Comparison {
    let mut latest = latest.carry_forward(prior);
    let mut events = Vec::new();

    if latest.stake() > prior.stake() {
        latest.mark_block_won(now_epoch_secs);
        events.push(Event::StakeEarned {
            balance: latest.balance(),
            stake: latest.stake(),
        });
    }

    if config.always_notify {
        events.push(Event::Status {
            balance: latest.balance(),
            stake: latest.stake(),
        });
    }

    if config.daily_status_update && latest.date() != prior.date() {
        events.push(Event::DailySummary {
            date: latest.date(),
            total_balance: latest.total_balance(),
            stake: latest.stake(),
        });
    }

    Comparison { latest, events }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;
    use stake_core::Amount;

    const NOW: i64 = 1_792_324_800;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, d).unwrap()
    }

    fn snap(balance: f64, stake: f64, d: u32) -> Snapshot {
        Snapshot::new(Amount::from_f64(balance), Amount::from_f64(stake), day(d))
    }

    fn quiet() -> MonitorConfig {
        MonitorConfig {
            always_notify: false,
            daily_status_update: false,
            ..Default::default()
        }
    }

    #[test]
    fn test_monitor_config_default() {
        let config = MonitorConfig::default();
        assert!(!config.always_notify);
        assert!(config.daily_status_update);
        assert!(config.monitor_temperature);
        assert_eq!(config.temperature_warning_threshold, 80.0);
    }

    #[test]
    fn test_monitor_config_partial_json() {
        let config: MonitorConfig = serde_json::from_str(r#"{"always_notify": true}"#).unwrap();
        assert!(config.always_notify);
        assert!(config.daily_status_update);
    }

    #[test]
    fn test_stake_increase_fires_once() {
        let prior = snap(1000.0, 10.0, 18);
        let result = compare(&prior, snap(990.0, 20.75, 18), &quiet(), NOW);

        assert_eq!(
            result.events,
            vec![Event::StakeEarned {
                balance: Amount::from_f64(990.0),
                stake: Amount::from_f64(20.75),
            }]
        );
        assert_eq!(result.latest.last_block_time_won(), NOW);
    }

    #[test]
    fn test_stake_flat_or_lower_is_silent() {
        let mut prior = snap(1000.0, 10.0, 18);
        prior.mark_block_won(1_700_000_000);

        for stake in [10.0, 9.99999999, 0.0] {
            let result = compare(&prior, snap(1000.0, stake, 18), &quiet(), NOW);
            assert!(result.events.is_empty(), "stake {stake} fired {:?}", result.events);
            assert_eq!(result.latest.last_block_time_won(), 1_700_000_000);
        }
    }

    #[test]
    fn test_smallest_increase_counts() {
        let prior = snap(1000.0, 10.0, 18);
        let result = compare(&prior, snap(1000.0, 10.00000001, 18), &quiet(), NOW);
        assert_eq!(result.events.len(), 1);
    }

    #[test]
    fn test_same_day_never_sends_summary() {
        let config = MonitorConfig {
            always_notify: true,
            daily_status_update: true,
            ..Default::default()
        };
        let result = compare(&snap(5.0, 1.0, 18), snap(5.0, 1.0, 18), &config, NOW);
        assert!(!result
            .events
            .iter()
            .any(|e| matches!(e, Event::DailySummary { .. })));
    }

    #[test]
    fn test_new_day_sends_one_summary() {
        let config = MonitorConfig {
            daily_status_update: true,
            ..quiet()
        };
        let result = compare(&snap(5.0, 1.0, 17), snap(5.5, 1.0, 18), &config, NOW);
        assert_eq!(
            result.events,
            vec![Event::DailySummary {
                date: day(18),
                total_balance: Amount::from_f64(6.5),
                stake: Amount::from_f64(1.0),
            }]
        );

        // Disabled: nothing even across the boundary
        let result = compare(&snap(5.0, 1.0, 17), snap(5.5, 1.0, 18), &quiet(), NOW);
        assert!(result.events.is_empty());
    }

    #[test]
    fn test_all_triggers_together() {
        let config = MonitorConfig {
            always_notify: true,
            daily_status_update: true,
            ..Default::default()
        };
        let result = compare(&snap(100.0, 2.0, 17), snap(100.0, 3.5, 18), &config, NOW);

        let balance = Amount::from_f64(100.0);
        let stake = Amount::from_f64(3.5);
        assert_eq!(
            result.events,
            vec![
                Event::StakeEarned { balance, stake },
                Event::Status { balance, stake },
                Event::DailySummary {
                    date: day(18),
                    total_balance: Amount::from_f64(103.5),
                    stake,
                },
            ]
        );
    }

    #[test]
    fn test_carries_initial_balance() {
        let prior = snap(700.0, 0.0, 17).with_initial_balance_from_current();
        let result = compare(&prior, snap(650.0, 52.0, 18), &quiet(), NOW);

        assert_eq!(result.latest.initial_balance(), Amount::from_f64(700.0));
        assert!(result.latest.is_consistent());
        assert_eq!(result.latest.total_balance(), Amount::from_f64(702.0));
    }
}
