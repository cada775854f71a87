//! Core data types for the stake monitor.

pub mod amount;
pub mod event;
pub mod snapshot;
pub mod wallet;

pub use amount::*;
pub use event::*;
pub use snapshot::*;
pub use wallet::*;
