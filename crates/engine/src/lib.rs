//! Snapshot-diff notification engine.
//!
//! This crate contains the decision logic for a stake monitor run:
//! precondition checks, snapshot comparison, and the run pipeline that
//! ties queries, notifications and persistence together.

pub mod diff;
pub mod monitor;
pub mod precheck;

pub use diff::*;
pub use monitor::*;
pub use precheck::*;
