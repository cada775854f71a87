//! Operator notifications for the stake monitor.
//!
//! This crate provides:
//! - Webhook transport for notifications
//! - Message formatting for each event
//! - File storage for the persisted snapshot

pub mod config;
pub mod message;
pub mod notifier;
pub mod store;

pub use config::AlertConfig;
pub use message::format_message;
pub use notifier::{AlertError, AlertResult, Notifier, RecordingNotifier, WebhookNotifier};
pub use store::{SnapshotStore, StoreError, StoredSnapshot};
