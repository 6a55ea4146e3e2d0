//! Configuration for the location bridge.
//!
//! Values set here are read by the module when tracking starts; changing
//! them while a tracker is active takes effect on the next
//! `start_updating_*` call.
//!
//! ## File format
//!
//! ```toml
//! distance_filter = 5.0
//! desired_accuracy = 10.0
//! heading_filter = 1.0
//! sensor_delay = "game"
//! accuracy_policy = "reject_below_threshold"
//! ```

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::Deserialize;

use crate::constants::{
    DEFAULT_DESIRED_ACCURACY_M, DEFAULT_DISTANCE_FILTER_M, DEFAULT_HEADING_FILTER_DEG,
};
use crate::error::{BridgeError, Result};

/// Sampling-rate hint passed to the host when registering the heading sensor
///
/// # Parsing formats
/// - `fastest`, `game`, `ui`, `normal` - named host rates (case insensitive)
/// - `20000us` or `20000μs` - explicit sampling period in microseconds
///
/// # Example
/// ```
/// use locbridge::config::SensorDelay;
///
/// let delay: SensorDelay = "game".parse().unwrap();
/// assert_eq!(delay.sampling_period_us(), 20_000);
///
/// let delay: SensorDelay = "5000us".parse().unwrap();
/// assert_eq!(delay, SensorDelay::Micros(5000));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(try_from = "String")]
pub enum SensorDelay {
    /// As fast as the sensor can deliver
    Fastest,
    /// Rate suitable for games (20 ms)
    #[default]
    Game,
    /// Rate suitable for UI updates (~67 ms)
    Ui,
    /// Rate suitable for screen orientation changes (200 ms)
    Normal,
    /// Explicit sampling period in microseconds
    Micros(u32),
}

impl SensorDelay {
    /// Sampling period in microseconds
    pub fn sampling_period_us(&self) -> u32 {
        match self {
            Self::Fastest => 0,
            Self::Game => 20_000,
            Self::Ui => 66_667,
            Self::Normal => 200_000,
            Self::Micros(us) => *us,
        }
    }
}

impl fmt::Display for SensorDelay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fastest => write!(f, "fastest"),
            Self::Game => write!(f, "game"),
            Self::Ui => write!(f, "ui"),
            Self::Normal => write!(f, "normal"),
            Self::Micros(us) => write!(f, "{}us", us),
        }
    }
}

impl FromStr for SensorDelay {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let s = s.trim();

        if let Some(num) = s.strip_suffix("us").or_else(|| s.strip_suffix("μs")) {
            let us: u32 = num
                .trim()
                .parse()
                .map_err(|_| format!("invalid sampling period: {}", s))?;
            return Ok(Self::Micros(us));
        }

        match s.to_ascii_lowercase().as_str() {
            "fastest" => Ok(Self::Fastest),
            "game" => Ok(Self::Game),
            "ui" => Ok(Self::Ui),
            "normal" => Ok(Self::Normal),
            _ => Err(format!("unknown sensor delay: {}", s)),
        }
    }
}

impl TryFrom<String> for SensorDelay {
    type Error = String;

    fn try_from(value: String) -> std::result::Result<Self, Self::Error> {
        value.parse()
    }
}

/// Decides which fixes the location filter rejects
///
/// The accuracy reported with a fix is an error radius, so a larger value
/// means a less precise fix. `RejectBelowThreshold` drops fixes whose
/// radius is smaller than the threshold, which keeps the imprecise ones.
/// It is the default because deployed clients depend on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum AccuracyPolicy {
    /// Drop fixes with `accuracy < threshold`
    #[default]
    RejectBelowThreshold,
    /// Drop fixes with `accuracy > threshold`
    RejectAboveThreshold,
}

impl AccuracyPolicy {
    /// Whether a fix with the given accuracy is dropped
    pub fn rejects(&self, accuracy_m: f64, threshold_m: f64) -> bool {
        match self {
            Self::RejectBelowThreshold => accuracy_m < threshold_m,
            Self::RejectAboveThreshold => accuracy_m > threshold_m,
        }
    }
}

/// Bridge configuration
///
/// # Example
/// ```
/// use locbridge::config::BridgeConfig;
///
/// let mut config = BridgeConfig::default();
/// config.heading_filter = 5.0;
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BridgeConfig {
    /// Minimum distance in meters the provider must see before delivering a fix
    pub distance_filter: f64,
    /// Accuracy threshold in meters used by the location filter
    pub desired_accuracy: f64,
    /// Minimum azimuth change in degrees before a heading event is emitted
    pub heading_filter: f64,
    /// Sampling-rate hint for the heading sensor
    pub sensor_delay: SensorDelay,
    /// Polarity of the accuracy filter
    pub accuracy_policy: AccuracyPolicy,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            distance_filter: DEFAULT_DISTANCE_FILTER_M,
            desired_accuracy: DEFAULT_DESIRED_ACCURACY_M,
            heading_filter: DEFAULT_HEADING_FILTER_DEG,
            sensor_delay: SensorDelay::Game,
            accuracy_policy: AccuracyPolicy::RejectBelowThreshold,
        }
    }
}

impl BridgeConfig {
    /// Load a configuration from a TOML file; missing keys keep their defaults
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| BridgeError::Config(format!("{}: {}", path.display(), e)))?;
        let config = Self::from_toml_str(&content)?;
        log::debug!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Parse and validate a configuration from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Self =
            toml::from_str(content).map_err(|e| BridgeError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Reject negative or non-finite filter values
    pub fn validate(&self) -> Result<()> {
        let fields = [
            ("distance_filter", self.distance_filter),
            ("desired_accuracy", self.desired_accuracy),
            ("heading_filter", self.heading_filter),
        ];
        for (name, value) in fields {
            if !value.is_finite() || value < 0.0 {
                return Err(BridgeError::Config(format!(
                    "{} must be a non-negative number, got {}",
                    name, value
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = BridgeConfig::default();
        assert_eq!(config.distance_filter, 5.0);
        assert_eq!(config.desired_accuracy, 10.0);
        assert_eq!(config.heading_filter, 1.0);
        assert_eq!(config.sensor_delay, SensorDelay::Game);
        assert_eq!(config.accuracy_policy, AccuracyPolicy::RejectBelowThreshold);
    }

    #[test]
    fn test_sensor_delay_named() {
        assert_eq!("fastest".parse::<SensorDelay>().unwrap(), SensorDelay::Fastest);
        assert_eq!("GAME".parse::<SensorDelay>().unwrap(), SensorDelay::Game);
        assert_eq!(" ui ".parse::<SensorDelay>().unwrap(), SensorDelay::Ui);
        assert_eq!("Normal".parse::<SensorDelay>().unwrap(), SensorDelay::Normal);
    }

    #[test]
    fn test_sensor_delay_micros() {
        assert_eq!("1000us".parse::<SensorDelay>().unwrap(), SensorDelay::Micros(1000));
        assert_eq!("250μs".parse::<SensorDelay>().unwrap(), SensorDelay::Micros(250));
        assert_eq!(SensorDelay::Micros(1000).to_string(), "1000us");
    }

    #[test]
    fn test_sensor_delay_invalid() {
        assert!("warp".parse::<SensorDelay>().is_err());
        assert!("-5us".parse::<SensorDelay>().is_err());
        assert!("us".parse::<SensorDelay>().is_err());
    }

    #[test]
    fn test_accuracy_policy_polarity() {
        let literal = AccuracyPolicy::RejectBelowThreshold;
        assert!(literal.rejects(5.0, 10.0));
        assert!(!literal.rejects(15.0, 10.0));
        assert!(!literal.rejects(10.0, 10.0));

        let corrected = AccuracyPolicy::RejectAboveThreshold;
        assert!(!corrected.rejects(5.0, 10.0));
        assert!(corrected.rejects(15.0, 10.0));
        assert!(!corrected.rejects(10.0, 10.0));
    }

    #[test]
    fn test_from_toml_partial() {
        let config = BridgeConfig::from_toml_str(
            r#"
            heading_filter = 2.5
            sensor_delay = "ui"
            accuracy_policy = "reject_above_threshold"
            "#,
        )
        .unwrap();
        assert_eq!(config.heading_filter, 2.5);
        assert_eq!(config.sensor_delay, SensorDelay::Ui);
        assert_eq!(config.accuracy_policy, AccuracyPolicy::RejectAboveThreshold);
        assert_eq!(config.distance_filter, 5.0);
    }

    #[test]
    fn test_from_toml_rejects_bad_values() {
        assert!(BridgeConfig::from_toml_str("heading_filter = -1.0").is_err());
        assert!(BridgeConfig::from_toml_str("sensor_delay = \"warp\"").is_err());
        assert!(BridgeConfig::from_toml_str("unknown_key = 1").is_err());
    }
}
