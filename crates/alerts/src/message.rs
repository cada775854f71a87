//! Plain-text message bodies for each event.

use stake_core::Event;

/// Format an event as the text sent to the operator.
///
/// Amounts are shown as whole coins, fractions truncated.
pub fn format_message(event: &Event, coin: &str) -> String {
    match event {
        Event::QueryFailed { command, reason } => {
            format!("Error running {}. Verify settings\n{}", command, reason)
        }
        Event::NoBalance => format!("No {} balance.", coin),
        Event::StakingError(errors) => format!("{} Errors: {}", coin, errors),
        Event::Locked => format!("{} Locked - Not Staking", coin),
        Event::StakingDisabled => format!("{} Staking disabled", coin),
        Event::NotYetStaking => format!("{} Not Yet Staking", coin),
        Event::TemperatureWarning { celsius, threshold } => format!(
            "{} Temperature Warning! {:.1}C above {:.1}C",
            coin, celsius, threshold
        ),
        Event::Initialized { reinitialized } => {
            if *reinitialized {
                format!("{} Monitor re-initialized (previous state unreadable)", coin)
            } else {
                format!("{} Monitor initialized", coin)
            }
        }
        Event::StakeEarned { balance, stake } => format!(
            "Stake earned! Balance: {} Stake: {}",
            balance.whole(),
            stake.whole()
        ),
        Event::Status { balance, stake } => {
            format!("Balance: {} Stake: {}", balance.whole(), stake.whole())
        }
        Event::DailySummary {
            date,
            total_balance,
            stake,
        } => format!(
            "Daily Update for {}:\nTotal Balance: {} Stake: {}",
            date,
            total_balance.whole(),
            stake.whole()
        ),
    }
}
