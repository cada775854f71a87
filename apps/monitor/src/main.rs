//! Stake Monitor
//!
//! Checks a proof-of-stake wallet daemon once and reports rewards, daily
//! summaries and problems to a webhook. Meant to be run from cron.

mod config;

use config::AppConfig;
use stake_alerts::{SnapshotStore, WebhookNotifier};
use stake_engine::{Monitor, RunOutcome};
use stake_feeds::{CommandSensor, DaemonCli};
use std::process::ExitCode;
use std::sync::Arc;
use tracing::{error, info, warn};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

fn init_logging(filter: &str) {
    let filter = EnvFilter::try_new(filter).unwrap_or_else(|_| EnvFilter::new("info"));

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact()
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .expect("Failed to set tracing subscriber");
}

fn build_monitor(config: &AppConfig) -> Result<Monitor, stake_alerts::AlertError> {
    let wallet = Arc::new(DaemonCli::from_install_path(&config.daemon_path));
    let notifier = Arc::new(WebhookNotifier::new(config.alerts.clone())?);
    let store = SnapshotStore::new(config.state_path());

    let mut monitor = Monitor::new(config.monitor, wallet, notifier, store);
    if config.monitor.monitor_temperature {
        match CommandSensor::from_command_line(&config.temperature_command) {
            Some(sensor) => monitor = monitor.with_temperature_sensor(Arc::new(sensor)),
            None => warn!("Temperature monitoring enabled but temperature_command is empty"),
        }
    }
    Ok(monitor)
}

fn describe(outcome: &RunOutcome) -> String {
    match outcome {
        RunOutcome::Halted(event) => format!("halted ({})", event.kind()),
        RunOutcome::FirstRun { reinitialized: true } => "re-initialized".to_string(),
        RunOutcome::FirstRun { reinitialized: false } => "initialized".to_string(),
        RunOutcome::Compared { events } => format!("compared, {} notification(s)", events.len()),
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    // Load .env file if present
    let _ = dotenvy::dotenv();

    let loaded = AppConfig::load();
    let level = loaded
        .as_ref()
        .map(|c| c.log_level.clone())
        .unwrap_or_else(|_| "info".to_string());
    init_logging(&level);

    let config = match loaded {
        Ok(config) => config,
        Err(e) => {
            error!("Configuration error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    info!(
        daemon_path = %config.daemon_path.display(),
        state_file = %config.state_path().display(),
        always_notify = config.monitor.always_notify,
        daily_status_update = config.monitor.daily_status_update,
        monitor_temperature = config.monitor.monitor_temperature,
        "Stake monitor starting"
    );

    let monitor = match build_monitor(&config) {
        Ok(monitor) => monitor,
        Err(e) => {
            error!("Failed to set up notifier: {}", e);
            return ExitCode::FAILURE;
        }
    };

    match monitor.run().await {
        Ok(outcome) => {
            info!(outcome = %describe(&outcome), "Run finished");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("Run failed: {}", e);
            ExitCode::FAILURE
        }
    }
}
