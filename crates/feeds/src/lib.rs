//! Status collection from the wallet daemon and host sensors.
//!
//! ## Architecture
//!
//! - `daemon` - `WalletSource` trait and the CLI-backed implementation
//! - `temperature` - `TemperatureSensor` trait and output parsing
//! - `command` - child process helper shared by both

pub mod command;
pub mod daemon;
pub mod error;
pub mod temperature;

pub use command::{program_name, run_command};
pub use daemon::{DaemonCli, MockWalletSource, WalletSource};
pub use error::*;
pub use temperature::{parse_temperature, CommandSensor, FixedTemperatureSensor, TemperatureSensor};
