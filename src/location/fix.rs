use serde::{Deserialize, Serialize};

use crate::error::{BridgeError, Result};

/// One position report from a location provider
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PositionFix {
    /// Longitude in degrees (-180 to 180)
    pub longitude: f64,
    /// Latitude in degrees (-90 to 90)
    pub latitude: f64,
    /// Ground speed in meters per second
    #[serde(default)]
    pub speed_mps: f64,
    /// Altitude above the WGS84 ellipsoid in meters
    #[serde(default)]
    pub altitude_m: f64,
    /// Horizontal accuracy radius in meters (larger is less precise)
    pub horizontal_accuracy_m: f64,
    /// Direction of travel in degrees (0-360)
    #[serde(default)]
    pub bearing_degrees: f64,
    /// Provider timestamp in milliseconds since the Unix epoch
    #[serde(default)]
    pub timestamp_millis: i64,
}

impl PositionFix {
    /// Fix with only a position and an accuracy radius
    pub fn new(longitude: f64, latitude: f64, horizontal_accuracy_m: f64) -> Self {
        Self {
            longitude,
            latitude,
            speed_mps: 0.0,
            altitude_m: 0.0,
            horizontal_accuracy_m,
            bearing_degrees: 0.0,
            timestamp_millis: 0,
        }
    }

    /// Check that the fields needed for an update are readable
    ///
    /// Only non-finite values fail. Coordinates outside the usual ranges
    /// are forwarded as the host reported them.
    pub fn validate(&self) -> Result<()> {
        if !self.latitude.is_finite() {
            return Err(BridgeError::InvalidFix(format!(
                "latitude {} is not finite",
                self.latitude
            )));
        }
        if !self.longitude.is_finite() {
            return Err(BridgeError::InvalidFix(format!(
                "longitude {} is not finite",
                self.longitude
            )));
        }
        if self.horizontal_accuracy_m.is_nan() {
            return Err(BridgeError::InvalidFix("accuracy is not a number".into()));
        }
        Ok(())
    }
}
