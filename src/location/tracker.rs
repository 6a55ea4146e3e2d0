use chrono::Utc;
use serde::Serialize;

use crate::config::AccuracyPolicy;
use crate::constants::{DEFAULT_DESIRED_ACCURACY_M, DEFAULT_DISTANCE_FILTER_M};
use crate::error::Result;

use super::PositionFix;

/// Location update forwarded to the application layer
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LocationEvent {
    pub longitude: f64,
    pub latitude: f64,
    /// Ground speed in meters per second
    pub speed: f64,
    /// Altitude in meters
    pub altitude: f64,
    /// Horizontal accuracy radius in meters
    pub accuracy: f64,
    /// Direction of travel in degrees
    pub course: f64,
    /// Wall-clock time the update was forwarded, in milliseconds since the Unix epoch
    pub timestamp: f64,
}

/// Turns position fixes into filtered location events
///
/// Every fix is retained as the last fix, whether or not it is forwarded.
/// The distance filter is only carried here so it can be handed to the
/// provider; it is never applied locally.
#[derive(Debug, Clone)]
pub struct LocationTracker {
    last_fix: Option<PositionFix>,
    accuracy_threshold: f64,
    distance_filter: f64,
    policy: AccuracyPolicy,
}

impl LocationTracker {
    pub fn new(accuracy_threshold_m: f64, distance_filter_m: f64, policy: AccuracyPolicy) -> Self {
        Self {
            last_fix: None,
            accuracy_threshold: accuracy_threshold_m,
            distance_filter: distance_filter_m,
            policy,
        }
    }

    /// Seed the last fix without forwarding anything
    pub fn seed(&mut self, fix: Option<PositionFix>) {
        self.last_fix = fix;
    }

    /// Process one fix, stamping the event with the current wall-clock time
    pub fn on_position_fix(&mut self, fix: PositionFix) -> Option<LocationEvent> {
        self.on_position_fix_at(fix, Utc::now().timestamp_millis() as f64)
    }

    /// Process one fix, stamping the event with `timestamp_millis`
    ///
    /// Failures while reading the fix are logged and the update is dropped.
    pub fn on_position_fix_at(
        &mut self,
        fix: PositionFix,
        timestamp_millis: f64,
    ) -> Option<LocationEvent> {
        self.last_fix = Some(fix);

        match self.read_event(&fix, timestamp_millis) {
            Ok(event) => event,
            Err(e) => {
                log::warn!("Dropping location update: {}", e);
                None
            }
        }
    }

    fn read_event(
        &self,
        fix: &PositionFix,
        timestamp_millis: f64,
    ) -> Result<Option<LocationEvent>> {
        fix.validate()?;

        if self
            .policy
            .rejects(fix.horizontal_accuracy_m, self.accuracy_threshold)
        {
            log::debug!(
                "Suppressing fix with accuracy {:.1} m (threshold {:.1} m, {:?})",
                fix.horizontal_accuracy_m,
                self.accuracy_threshold,
                self.policy
            );
            return Ok(None);
        }

        log::info!(
            "Got new location. Lng: {} Lat: {}",
            fix.longitude,
            fix.latitude
        );

        Ok(Some(LocationEvent {
            longitude: fix.longitude,
            latitude: fix.latitude,
            speed: fix.speed_mps,
            altitude: fix.altitude_m,
            accuracy: fix.horizontal_accuracy_m,
            course: fix.bearing_degrees,
            timestamp: timestamp_millis,
        }))
    }

    pub fn last_fix(&self) -> Option<&PositionFix> {
        self.last_fix.as_ref()
    }

    pub fn accuracy_threshold(&self) -> f64 {
        self.accuracy_threshold
    }

    pub fn distance_filter(&self) -> f64 {
        self.distance_filter
    }

    pub fn policy(&self) -> AccuracyPolicy {
        self.policy
    }

    /// Replace the filter settings; the retained fix is kept
    pub fn configure(
        &mut self,
        accuracy_threshold_m: f64,
        distance_filter_m: f64,
        policy: AccuracyPolicy,
    ) {
        self.accuracy_threshold = accuracy_threshold_m;
        self.distance_filter = distance_filter_m;
        self.policy = policy;
    }
}

impl Default for LocationTracker {
    fn default() -> Self {
        Self::new(
            DEFAULT_DESIRED_ACCURACY_M,
            DEFAULT_DISTANCE_FILTER_M,
            AccuracyPolicy::RejectBelowThreshold,
        )
    }
}
