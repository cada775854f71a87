//! Board temperature readings.

use crate::command::run_command;
use crate::error::{FeedError, FeedResult};
use async_trait::async_trait;
use std::path::PathBuf;

/// A source of temperature readings in degrees Celsius.
#[async_trait]
pub trait TemperatureSensor: Send + Sync {
    async fn read_celsius(&self) -> FeedResult<f64>;
}

/// Parse `vcgencmd measure_temp` output such as `temp=48.3'C`.
///
/// The reading is the text between `=` and the unit marker.
pub fn parse_temperature(output: &str) -> FeedResult<f64> {
    let output = output.trim();
    let (_, rest) = output
        .split_once('=')
        .ok_or_else(|| FeedError::ParseError(format!("no '=' in temperature output: {:?}", output)))?;
    let rest = rest.trim_start();

    let end = rest
        .find(|c: char| c == '\'' || c == '°' || c == 'C' || c.is_whitespace())
        .unwrap_or(rest.len());
    let value = rest[..end].trim();

    let celsius: f64 = value
        .parse()
        .map_err(|_| FeedError::ParseError(format!("bad temperature value: {:?}", value)))?;
    if !celsius.is_finite() {
        return Err(FeedError::ParseError(format!("bad temperature value: {:?}", value)));
    }
    Ok(celsius)
}

/// Reads temperature by running an external command and parsing its output.
#[derive(Debug, Clone)]
pub struct CommandSensor {
    program: PathBuf,
    args: Vec<String>,
}

impl CommandSensor {
    pub const DEFAULT_PROGRAM: &'static str = "/opt/vc/bin/vcgencmd";
    pub const DEFAULT_ARGS: &'static [&'static str] = &["measure_temp"];

    pub fn new(program: impl Into<PathBuf>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }

    /// Build from a command line split on whitespace, e.g. `"vcgencmd measure_temp"`.
    pub fn from_command_line(command: &str) -> Option<Self> {
        let mut parts = command.split_whitespace();
        let program = parts.next()?;
        Some(Self::new(program, parts.map(str::to_string).collect()))
    }
}

impl Default for CommandSensor {
    fn default() -> Self {
        Self::new(
            Self::DEFAULT_PROGRAM,
            Self::DEFAULT_ARGS.iter().map(|a| a.to_string()).collect(),
        )
    }
}

#[async_trait]
impl TemperatureSensor for CommandSensor {
    async fn read_celsius(&self) -> FeedResult<f64> {
        let args: Vec<&str> = self.args.iter().map(String::as_str).collect();
        let output = run_command(&self.program, &args).await?;
        parse_temperature(&output)
    }
}

/// Sensor with a canned reading, for tests and for boards without a sensor.
#[derive(Debug, Clone, Copy)]
pub struct FixedTemperatureSensor(pub Option<f64>);

#[async_trait]
impl TemperatureSensor for FixedTemperatureSensor {
    async fn read_celsius(&self) -> FeedResult<f64> {
        self.0
            .ok_or_else(|| FeedError::ParseError("no temperature reading".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_vcgencmd_output() {
        assert_eq!(parse_temperature("temp=48.3'C\n").unwrap(), 48.3);
        assert_eq!(parse_temperature("temp=81.0'C").unwrap(), 81.0);
    }

    #[test]
    fn test_parse_equivalent_forms() {
        assert_eq!(parse_temperature("temp=55C").unwrap(), 55.0);
        assert_eq!(parse_temperature("temp=62.1°C").unwrap(), 62.1);
        assert_eq!(parse_temperature("temp= 40.0 'C").unwrap(), 40.0);
        assert_eq!(parse_temperature("temp=40").unwrap(), 40.0);
    }

    #[test]
    fn test_parse_malformed() {
        assert!(parse_temperature("").unwrap_err().is_parse_error());
        assert!(parse_temperature("48.3'C").is_err());
        assert!(parse_temperature("temp='C").is_err());
        assert!(parse_temperature("temp=hot'C").is_err());
        assert!(parse_temperature("temp=NaN'C").is_err());
    }

    #[test]
    fn test_from_command_line() {
        let sensor = CommandSensor::from_command_line("/usr/bin/vcgencmd measure_temp").unwrap();
        assert_eq!(sensor.program, PathBuf::from("/usr/bin/vcgencmd"));
        assert_eq!(sensor.args, vec!["measure_temp".to_string()]);
        assert!(CommandSensor::from_command_line("   ").is_none());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_command_sensor_reads_output() {
        let sensor = CommandSensor::new("echo", vec!["temp=48.3'C".to_string()]);
        assert_eq!(sensor.read_celsius().await.unwrap(), 48.3);
    }

    #[tokio::test]
    async fn test_fixed_sensor() {
        assert_eq!(FixedTemperatureSensor(Some(70.5)).read_celsius().await.unwrap(), 70.5);
        assert!(FixedTemperatureSensor(None).read_celsius().await.is_err());
    }
}
