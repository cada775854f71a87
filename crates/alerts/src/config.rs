//! Alert configuration types.

use serde::{Deserialize, Serialize};

/// Where notifications go and how they are labelled.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AlertConfig {
    /// Incoming-webhook URL that accepts `{"text": ...}`
    pub webhook_url: String,
    /// Coin label used in message text
    pub coin: String,
}

impl Default for AlertConfig {
    fn default() -> Self {
        Self {
            webhook_url: String::new(),
            coin: "QTUM".to_string(),
        }
    }
}

impl AlertConfig {
    /// Create a new config for a webhook.
    pub fn new(webhook_url: impl Into<String>) -> Self {
        Self {
            webhook_url: webhook_url.into(),
            ..Default::default()
        }
    }

    pub fn with_coin(mut self, coin: impl Into<String>) -> Self {
        self.coin = coin.into();
        self
    }

    /// True once a destination has been set.
    pub fn has_destination(&self) -> bool {
        !self.webhook_url.trim().is_empty()
    }
}
