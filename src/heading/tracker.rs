use serde::Serialize;

use crate::platform::{SensorEvent, SensorType};

use super::orientation::{
    corrected_azimuth_degrees, orientation_from_matrix, rotation_matrix_from_vector,
};

/// Heading update forwarded to the application layer
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HeadingEvent {
    /// Corrected azimuth in degrees (0-360)
    pub heading: f64,
}

/// Turns rotation-vector samples into filtered heading events
///
/// Only the last emitted azimuth is retained between samples. A sample
/// that does not move the heading by at least the filter threshold leaves
/// the tracker untouched, so slow drift accumulates against the last
/// emitted value rather than the last observed one.
#[derive(Debug, Clone)]
pub struct HeadingTracker {
    last_emitted_azimuth: f64,
    filter_threshold: f64,
}

impl HeadingTracker {
    pub fn new(filter_threshold_degrees: f64) -> Self {
        Self {
            last_emitted_azimuth: 0.0,
            filter_threshold: filter_threshold_degrees,
        }
    }

    /// Process one sensor sample
    ///
    /// Samples from any sensor other than the rotation vector, and samples
    /// that do not yield a finite azimuth, are ignored.
    pub fn on_orientation_sample(&mut self, sample: &SensorEvent) -> Option<HeadingEvent> {
        if sample.sensor != SensorType::RotationVector {
            return None;
        }

        let rotation = rotation_matrix_from_vector(&sample.values)?;
        let orientation = orientation_from_matrix(&rotation);
        let azimuth = corrected_azimuth_degrees(&orientation);

        if !azimuth.is_finite() {
            log::trace!("Discarding rotation vector with non-finite azimuth");
            return None;
        }

        self.on_azimuth(azimuth)
    }

    /// Apply the heading filter to an already corrected azimuth
    pub fn on_azimuth(&mut self, azimuth_degrees: f64) -> Option<HeadingEvent> {
        if (self.last_emitted_azimuth - azimuth_degrees).abs() < self.filter_threshold {
            return None;
        }

        self.last_emitted_azimuth = azimuth_degrees;
        Some(HeadingEvent {
            heading: azimuth_degrees,
        })
    }

    pub fn last_emitted_azimuth(&self) -> f64 {
        self.last_emitted_azimuth
    }

    pub fn filter_threshold(&self) -> f64 {
        self.filter_threshold
    }

    pub fn set_filter_threshold(&mut self, degrees: f64) {
        self.filter_threshold = degrees;
    }
}

impl Default for HeadingTracker {
    fn default() -> Self {
        Self::new(crate::constants::DEFAULT_HEADING_FILTER_DEG)
    }
}
