use std::collections::{HashMap, HashSet};

use crate::config::SensorDelay;
use crate::error::{BridgeError, Result};
use crate::location::{PositionFix, Provider};

use super::{ListenerHandle, LocationRequest, LocationService, SensorService, SensorType};

/// In-memory host that records listener registrations
///
/// Used by the CLI to drive the module from replayed or simulated
/// callbacks, and by tests to inspect what the module registered.
#[derive(Debug)]
pub struct RecordingHost {
    sensors: HashSet<SensorType>,
    enabled_providers: HashSet<Provider>,
    last_known: HashMap<Provider, PositionFix>,
    sensor_listeners: HashMap<ListenerHandle, (SensorType, SensorDelay)>,
    location_listeners: HashMap<ListenerHandle, LocationRequest>,
    next_handle: u64,
}

impl RecordingHost {
    /// Host with every sensor present and both providers enabled
    pub fn new() -> Self {
        Self {
            sensors: [
                SensorType::Accelerometer,
                SensorType::MagneticField,
                SensorType::Gyroscope,
                SensorType::RotationVector,
                SensorType::GameRotationVector,
            ]
            .into_iter()
            .collect(),
            enabled_providers: [Provider::Gps, Provider::Network].into_iter().collect(),
            last_known: HashMap::new(),
            sensor_listeners: HashMap::new(),
            location_listeners: HashMap::new(),
            next_handle: 1,
        }
    }

    pub fn with_provider(mut self, provider: Provider, enabled: bool) -> Self {
        self.set_provider_enabled(provider, enabled);
        self
    }

    pub fn without_sensor(mut self, sensor: SensorType) -> Self {
        self.sensors.remove(&sensor);
        self
    }

    pub fn with_last_known_fix(mut self, provider: Provider, fix: PositionFix) -> Self {
        self.last_known.insert(provider, fix);
        self
    }

    pub fn set_provider_enabled(&mut self, provider: Provider, enabled: bool) {
        if enabled {
            self.enabled_providers.insert(provider);
        } else {
            self.enabled_providers.remove(&provider);
        }
    }

    /// Drop every registration, as a host does when its service restarts
    pub fn revoke_all(&mut self) {
        self.sensor_listeners.clear();
        self.location_listeners.clear();
    }

    pub fn sensor_registrations(&self) -> Vec<(SensorType, SensorDelay)> {
        self.sensor_listeners.values().copied().collect()
    }

    pub fn location_requests(&self) -> Vec<LocationRequest> {
        self.location_listeners.values().copied().collect()
    }

    fn allocate_handle(&mut self) -> ListenerHandle {
        let handle = ListenerHandle(self.next_handle);
        self.next_handle += 1;
        handle
    }
}

impl Default for RecordingHost {
    fn default() -> Self {
        Self::new()
    }
}

impl SensorService for RecordingHost {
    fn has_sensor(&self, sensor: SensorType) -> bool {
        self.sensors.contains(&sensor)
    }

    fn register_listener(
        &mut self,
        sensor: SensorType,
        delay: SensorDelay,
    ) -> Result<ListenerHandle> {
        if !self.has_sensor(sensor) {
            return Err(BridgeError::SensorRegistration(format!(
                "no {:?} sensor",
                sensor
            )));
        }
        let handle = self.allocate_handle();
        self.sensor_listeners.insert(handle, (sensor, delay));
        log::debug!("Registered {:?} listener {:?} at {}", sensor, handle, delay);
        Ok(handle)
    }

    fn unregister_listener(&mut self, handle: ListenerHandle) -> Result<()> {
        self.sensor_listeners
            .remove(&handle)
            .map(|_| ())
            .ok_or_else(|| {
                BridgeError::SensorRegistration(format!("unknown listener {:?}", handle))
            })
    }
}

impl LocationService for RecordingHost {
    fn is_provider_enabled(&self, provider: Provider) -> bool {
        self.enabled_providers.contains(&provider)
    }

    fn last_known_fix(&self, provider: Provider) -> Option<PositionFix> {
        self.last_known.get(&provider).copied()
    }

    fn request_updates(&mut self, request: &LocationRequest) -> Result<ListenerHandle> {
        if !self.is_provider_enabled(request.provider) {
            return Err(BridgeError::ProviderUnavailable(request.provider.to_string()));
        }
        let handle = self.allocate_handle();
        self.location_listeners.insert(handle, *request);
        log::debug!("Requested {} updates as {:?}", request.provider, handle);
        Ok(handle)
    }

    fn remove_updates(&mut self, handle: ListenerHandle) -> Result<()> {
        self.location_listeners
            .remove(&handle)
            .map(|_| ())
            .ok_or_else(|| BridgeError::Disconnected(format!("unknown listener {:?}", handle)))
    }
}
