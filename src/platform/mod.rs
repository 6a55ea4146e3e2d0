//! Host sensor and location services.
//!
//! The module never talks to a device directly. It registers listeners
//! through these traits and receives the resulting callbacks from whatever
//! drives it (see [`crate::source`]).

pub mod recording;

use serde::{Deserialize, Serialize};

use crate::config::SensorDelay;
use crate::error::Result;
use crate::location::{PositionFix, Provider};

pub use recording::RecordingHost;

/// Kind of sensor that produced a sample
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SensorType {
    Accelerometer,
    MagneticField,
    Gyroscope,
    RotationVector,
    GameRotationVector,
    #[serde(other)]
    Unknown,
}

/// One raw sensor sample
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SensorEvent {
    pub sensor: SensorType,
    pub values: Vec<f32>,
    #[serde(default)]
    pub timestamp_nanos: i64,
}

/// Opaque id of a listener registration on the host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerHandle(pub u64);

/// Parameters of a location update registration
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LocationRequest {
    pub provider: Provider,
    /// Minimum time between updates in milliseconds
    pub min_time_ms: u64,
    /// Minimum distance between updates in meters
    pub min_distance_m: f64,
}

pub trait SensorService {
    /// Whether the host has a default sensor of this type
    fn has_sensor(&self, sensor: SensorType) -> bool;

    fn register_listener(
        &mut self,
        sensor: SensorType,
        delay: SensorDelay,
    ) -> Result<ListenerHandle>;

    fn unregister_listener(&mut self, handle: ListenerHandle) -> Result<()>;
}

pub trait LocationService {
    fn is_provider_enabled(&self, provider: Provider) -> bool;

    fn last_known_fix(&self, provider: Provider) -> Option<PositionFix>;

    fn request_updates(&mut self, request: &LocationRequest) -> Result<ListenerHandle>;

    fn remove_updates(&mut self, handle: ListenerHandle) -> Result<()>;
}

/// Host offering both sensor and location services
pub trait Platform: SensorService + LocationService {}

impl<T: SensorService + LocationService> Platform for T {}
