//! Alert notification transport.

use crate::config::AlertConfig;
use crate::message::format_message;
use async_trait::async_trait;
use stake_core::Event;
use std::sync::Mutex;
use thiserror::Error;
use tracing::{info, warn};

#[derive(Error, Debug)]
pub enum AlertError {
    #[error("Webhook request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("No webhook URL configured")]
    MissingDestination,
    #[error("Notification transport unavailable: {0}")]
    Unavailable(String),
}

pub type AlertResult<T> = Result<T, AlertError>;

/// Delivers events to the operator. Each call is one outbound message.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn notify(&self, event: &Event) -> AlertResult<()>;
}

/// Posts `{"text": "<message>"}` to an incoming-webhook URL (Slack and compatibles).
pub struct WebhookNotifier {
    config: AlertConfig,
    http_client: reqwest::Client,
}

impl std::fmt::Debug for WebhookNotifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // The webhook URL embeds a secret token
        f.debug_struct("WebhookNotifier")
            .field("coin", &self.config.coin)
            .finish()
    }
}

impl WebhookNotifier {
    /// Create a new webhook notifier.
    pub fn new(config: AlertConfig) -> AlertResult<Self> {
        if !config.has_destination() {
            return Err(AlertError::MissingDestination);
        }
        Ok(Self {
            config,
            http_client: reqwest::Client::new(),
        })
    }

    /// Send raw text. Transport errors propagate; a non-success status is only logged.
    pub async fn send_text(&self, text: &str) -> AlertResult<()> {
        let payload = serde_json::json!({ "text": text });
        let response = self
            .http_client
            .post(&self.config.webhook_url)
            .json(&payload)
            .send()
            .await?;

        if !response.status().is_success() {
            warn!(
                status = %response.status(),
                "Webhook returned non-success status"
            );
        }
        Ok(())
    }
}

#[async_trait]
impl Notifier for WebhookNotifier {
    async fn notify(&self, event: &Event) -> AlertResult<()> {
        let message = format_message(event, &self.config.coin);
        self.send_text(&message).await?;
        info!(event = event.kind(), "Notification sent");
        Ok(())
    }
}

/// Notifier that keeps events in memory. Used in tests and dry runs.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    events: Mutex<Vec<Event>>,
    fail: bool,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// A notifier whose every send fails, like an unreachable webhook.
    pub fn failing() -> Self {
        Self {
            events: Mutex::new(Vec::new()),
            fail: true,
        }
    }

    /// Events delivered so far, in order.
    pub fn events(&self) -> Vec<Event> {
        match self.events.lock() {
            Ok(events) => events.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    /// Messages delivered so far, formatted with the given coin label.
    pub fn messages(&self, coin: &str) -> Vec<String> {
        self.events()
            .iter()
            .map(|e| format_message(e, coin))
            .collect()
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn notify(&self, event: &Event) -> AlertResult<()> {
        if self.fail {
            return Err(AlertError::Unavailable("recording notifier set to fail".into()));
        }
        let mut events = self
            .events
            .lock()
            .map_err(|_| AlertError::Unavailable("recording notifier lock poisoned".into()))?;
        events.push(event.clone());
        Ok(())
    }
}
