//! One check-compare-report-persist cycle.
//!
//! Steps run strictly in sequence: query the daemon, stop early on any
//! blocking condition, warn on temperature, compare with the stored snapshot,
//! send events, then persist. Nothing is written when a run stops early or a
//! notification fails.

use crate::diff::{compare, MonitorConfig};
use crate::precheck::{halt_reason, temperature_warning};
use chrono::{DateTime, Local};
use stake_alerts::{AlertError, Notifier, SnapshotStore, StoreError, StoredSnapshot};
use stake_core::{Event, Snapshot, StakingInfo, WalletInfo};
use stake_feeds::{FeedResult, TemperatureSensor, WalletSource};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};

#[derive(Error, Debug)]
pub enum MonitorError {
    #[error("Notification failed: {0}")]
    Alert(#[from] AlertError),
    #[error("Snapshot storage failed: {0}")]
    Store(#[from] StoreError),
}

pub type MonitorResult<T> = Result<T, MonitorError>;

/// How a run ended.
#[derive(Debug, Clone, PartialEq)]
pub enum RunOutcome {
    /// Stopped before comparing; the event says why. Nothing was persisted.
    Halted(Event),
    /// No usable prior snapshot; a new baseline was written.
    FirstRun { reinitialized: bool },
    /// Compared against the prior snapshot and persisted the new one.
    Compared { events: Vec<Event> },
}

impl RunOutcome {
    pub fn persisted(&self) -> bool {
        !matches!(self, RunOutcome::Halted(_))
    }
}

/// Snapshot-diff notifier.
pub struct Monitor {
    config: MonitorConfig,
    wallet: Arc<dyn WalletSource>,
    sensor: Option<Arc<dyn TemperatureSensor>>,
    notifier: Arc<dyn Notifier>,
    store: SnapshotStore,
}

impl Monitor {
    /// Create a new monitor.
    pub fn new(
        config: MonitorConfig,
        wallet: Arc<dyn WalletSource>,
        notifier: Arc<dyn Notifier>,
        store: SnapshotStore,
    ) -> Self {
        Self {
            config,
            wallet,
            sensor: None,
            notifier,
            store,
        }
    }

    /// Set the temperature sensor. Only read when `monitor_temperature` is on.
    pub fn with_temperature_sensor(mut self, sensor: Arc<dyn TemperatureSensor>) -> Self {
        self.sensor = Some(sensor);
        self
    }

    pub fn config(&self) -> &MonitorConfig {
        &self.config
    }

    /// Run one cycle against the local clock.
    pub async fn run(&self) -> MonitorResult<RunOutcome> {
        self.run_at(Local::now()).await
    }

    /// Run one cycle as of `now`.
    pub async fn run_at(&self, now: DateTime<Local>) -> MonitorResult<RunOutcome> {
        let (wallet, staking) = match self.query().await {
            Ok(status) => status,
            Err(e) => {
                warn!(error = %e, "Wallet query failed");
                let event = Event::QueryFailed {
                    command: self.wallet.name(),
                    reason: e.to_string(),
                };
                return self.halt(event).await;
            }
        };

        debug!(
            balance = %wallet.balance,
            stake = %wallet.stake,
            enabled = staking.enabled,
            staking = staking.staking,
            "Wallet status"
        );

        if let Some(event) = halt_reason(&wallet, &staking) {
            return self.halt(event).await;
        }

        self.check_temperature().await?;

        let latest = Snapshot::observe(&wallet, now.date_naive());
        let prior = match self.store.load().await? {
            StoredSnapshot::Present(prior) => prior,
            StoredSnapshot::Absent => return self.initialize(latest, false).await,
            StoredSnapshot::Corrupt(reason) => {
                warn!(
                    path = %self.store.path().display(),
                    error = %reason,
                    "State file unreadable, re-initializing"
                );
                return self.initialize(latest, true).await;
            }
        };

        let comparison = compare(&prior, latest, &self.config, now.timestamp());
        for event in &comparison.events {
            self.notifier.notify(event).await?;
        }
        self.store.save(&comparison.latest).await?;

        info!(
            balance = %comparison.latest.balance(),
            stake = %comparison.latest.stake(),
            events = comparison.events.len(),
            "Snapshot compared and saved"
        );
        Ok(RunOutcome::Compared {
            events: comparison.events,
        })
    }

    async fn query(&self) -> FeedResult<(WalletInfo, StakingInfo)> {
        let wallet = self.wallet.wallet_info().await?;
        let staking = self.wallet.staking_info().await?;
        Ok((wallet, staking))
    }

    async fn halt(&self, event: Event) -> MonitorResult<RunOutcome> {
        info!(reason = event.kind(), "Run stopped before comparison");
        self.notifier.notify(&event).await?;
        Ok(RunOutcome::Halted(event))
    }

    async fn check_temperature(&self) -> MonitorResult<()> {
        if !self.config.monitor_temperature {
            return Ok(());
        }
        let Some(sensor) = &self.sensor else {
            debug!("Temperature monitoring enabled but no sensor configured");
            return Ok(());
        };

        match sensor.read_celsius().await {
            Ok(celsius) => {
                debug!(celsius, "Temperature reading");
                let threshold = self.config.temperature_warning_threshold;
                if let Some(event) = temperature_warning(celsius, threshold) {
                    warn!(celsius, threshold, "Temperature above threshold");
                    self.notifier.notify(&event).await?;
                }
            }
            Err(e) => warn!(error = %e, "Temperature reading failed, skipping check"),
        }
        Ok(())
    }

    async fn initialize(&self, latest: Snapshot, reinitialized: bool) -> MonitorResult<RunOutcome> {
        let latest = latest.with_initial_balance_from_current();
        self.store.save(&latest).await?;
        info!(
            balance = %latest.balance(),
            stake = %latest.stake(),
            reinitialized,
            "Monitor initialized"
        );
        self.notifier
            .notify(&Event::Initialized { reinitialized })
            .await?;
        Ok(RunOutcome::FirstRun { reinitialized })
    }
}
