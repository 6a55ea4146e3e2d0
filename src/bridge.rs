//! Command surface exposed to the application layer.
//!
//! [`LocationModule`] owns both trackers, the host services they register
//! with and the sink events leave through. Host callbacks arrive through
//! [`LocationModule::dispatch`] and are routed to a tracker only while
//! that tracker's listener is registered.

use serde::{Deserialize, Serialize};

use crate::config::{AccuracyPolicy, BridgeConfig, SensorDelay};
use crate::constants::{LOCATION_MIN_TIME_MS, MODULE_NAME};
use crate::error::{BridgeError, Result};
use crate::events::{BridgeEvent, EventSink};
use crate::heading::HeadingTracker;
use crate::location::{LocationTracker, PositionFix, Provider, select_provider};
use crate::platform::{ListenerHandle, LocationRequest, Platform, SensorEvent, SensorType};

/// Callback delivered by the host
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum HostCallback {
    SensorChanged(SensorEvent),
    SensorAccuracyChanged { sensor: SensorType, accuracy: i32 },
    LocationChanged(PositionFix),
    /// The provider went away while a fix was being read
    LocationUnavailable { reason: String },
    ProviderEnabled { provider: Provider },
    ProviderDisabled { provider: Provider },
}

/// Lifecycle of one tracker
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackingState {
    Idle,
    Active,
}

pub struct LocationModule<H: Platform> {
    host: H,
    sink: Box<dyn EventSink>,
    config: BridgeConfig,
    heading: HeadingTracker,
    location: LocationTracker,
    provider: Provider,
    heading_listener: Option<ListenerHandle>,
    location_listener: Option<ListenerHandle>,
}

impl<H: Platform> LocationModule<H> {
    /// Build the module and seed the last fix from the preferred provider
    pub fn new(host: H, sink: Box<dyn EventSink>, config: BridgeConfig) -> Self {
        let provider = select_provider(&host);
        let mut location = LocationTracker::new(
            config.desired_accuracy,
            config.distance_filter,
            config.accuracy_policy,
        );
        location.seed(host.last_known_fix(provider));

        Self {
            heading: HeadingTracker::new(config.heading_filter),
            location,
            provider,
            host,
            sink,
            config,
            heading_listener: None,
            location_listener: None,
        }
    }

    pub fn name(&self) -> &'static str {
        MODULE_NAME
    }

    pub fn request_always_authorization(&self) {
        log::info!("Requesting AlwaysAuthorization");
    }

    pub fn request_when_in_use_authorization(&self) {
        log::info!("Requesting WhenInUseAuthorization");
    }

    pub fn set_sensor_delay(&mut self, delay: SensorDelay) {
        self.config.sensor_delay = delay;
    }

    pub fn set_distance_filter(&mut self, meters: f64) {
        self.config.distance_filter = meters;
    }

    pub fn set_desired_accuracy(&mut self, meters: f64) {
        self.config.desired_accuracy = meters;
    }

    pub fn set_heading_filter(&mut self, degrees: f64) {
        self.config.heading_filter = degrees;
    }

    pub fn set_accuracy_policy(&mut self, policy: AccuracyPolicy) {
        self.config.accuracy_policy = policy;
    }

    /// Register for rotation-vector samples
    ///
    /// A registration that is already active is released first, so at
    /// most one heading listener exists at any time.
    pub fn start_updating_heading(&mut self) -> Result<()> {
        self.stop_updating_heading();

        if !self.host.has_sensor(SensorType::RotationVector) {
            return Err(BridgeError::SensorUnavailable(
                "no rotation vector sensor".into(),
            ));
        }

        self.heading.set_filter_threshold(self.config.heading_filter);
        let handle = self
            .host
            .register_listener(SensorType::RotationVector, self.config.sensor_delay)?;
        self.heading_listener = Some(handle);
        log::info!(
            "Heading updates started (filter {:.1}°, delay {})",
            self.config.heading_filter,
            self.config.sensor_delay
        );
        Ok(())
    }

    pub fn stop_updating_heading(&mut self) {
        if let Some(handle) = self.heading_listener.take() {
            match self.host.unregister_listener(handle) {
                Ok(()) => log::info!("Heading updates stopped"),
                Err(e) => log::warn!("Ignoring failure to unregister heading listener: {}", e),
            }
        }
    }

    /// Request position fixes from the preferred provider
    ///
    /// The provider is re-selected on every call. A request that is
    /// already active is released first.
    pub fn start_updating_location(&mut self) -> Result<()> {
        self.stop_updating_location();

        self.location.configure(
            self.config.desired_accuracy,
            self.config.distance_filter,
            self.config.accuracy_policy,
        );
        self.provider = select_provider(&self.host);

        let request = LocationRequest {
            provider: self.provider,
            min_time_ms: LOCATION_MIN_TIME_MS,
            min_distance_m: self.config.distance_filter,
        };
        let handle = self.host.request_updates(&request)?;
        self.location_listener = Some(handle);
        log::info!(
            "Location updates started ({}, distance filter {:.1} m)",
            self.provider,
            self.config.distance_filter
        );
        Ok(())
    }

    pub fn stop_updating_location(&mut self) {
        if let Some(handle) = self.location_listener.take() {
            match self.host.remove_updates(handle) {
                Ok(()) => log::info!("Location service disabled."),
                Err(e) => log::warn!("Ignoring failure to remove location updates: {}", e),
            }
        }
    }

    /// Deregister every active listener
    pub fn shutdown(&mut self) {
        self.stop_updating_heading();
        self.stop_updating_location();
    }

    /// Route one host callback to the tracker listening for it
    ///
    /// Returns the event that was handed to the sink, if any.
    pub fn dispatch(&mut self, callback: HostCallback) -> Option<BridgeEvent> {
        match callback {
            HostCallback::SensorChanged(sample) => {
                if self.heading_listener.is_none() {
                    log::trace!("Dropping {:?} sample, heading idle", sample.sensor);
                    return None;
                }
                let event = self.heading.on_orientation_sample(&sample)?;
                self.send_event(event.into())
            }
            HostCallback::LocationChanged(fix) => {
                if self.location_listener.is_none() {
                    log::trace!("Dropping fix, location idle");
                    return None;
                }
                let event = self.location.on_position_fix(fix)?;
                self.send_event(event.into())
            }
            HostCallback::LocationUnavailable { reason } => {
                if self.location_listener.is_some() {
                    log::warn!("Location services disconnected. ({})", reason);
                }
                None
            }
            HostCallback::SensorAccuracyChanged { sensor, accuracy } => {
                log::debug!("{:?} accuracy changed to {}", sensor, accuracy);
                None
            }
            HostCallback::ProviderEnabled { provider } => {
                log::debug!("Provider {} enabled", provider);
                None
            }
            HostCallback::ProviderDisabled { provider } => {
                log::debug!("Provider {} disabled", provider);
                None
            }
        }
    }

    fn send_event(&self, event: BridgeEvent) -> Option<BridgeEvent> {
        if !self.sink.is_ready() {
            log::info!("Waiting for event bridge...");
            return None;
        }
        if let Err(e) = self.sink.emit(event.name(), event.payload()) {
            log::warn!("Failed to emit {}: {}", event.name(), e);
            return None;
        }
        Some(event)
    }

    pub fn heading_state(&self) -> TrackingState {
        state_of(self.heading_listener)
    }

    pub fn location_state(&self) -> TrackingState {
        state_of(self.location_listener)
    }

    pub fn heading_tracker(&self) -> &HeadingTracker {
        &self.heading
    }

    pub fn location_tracker(&self) -> &LocationTracker {
        &self.location
    }

    pub fn last_fix(&self) -> Option<&PositionFix> {
        self.location.last_fix()
    }

    /// Provider chosen by the last selection
    pub fn provider(&self) -> Provider {
        self.provider
    }

    pub fn config(&self) -> &BridgeConfig {
        &self.config
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }
}

impl<H: Platform> Drop for LocationModule<H> {
    fn drop(&mut self) {
        self.shutdown();
    }
}

fn state_of(listener: Option<ListenerHandle>) -> TrackingState {
    match listener {
        Some(_) => TrackingState::Active,
        None => TrackingState::Idle,
    }
}
