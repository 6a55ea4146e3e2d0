//! Names and defaults shared between the module, its trackers and the host.
//!
//! Event names are part of the wire contract with the application layer
//! and must not change.

/// Name the module registers under with the application layer.
pub const MODULE_NAME: &str = "RNLocation";

/// Event emitted when the corrected heading moves past the heading filter.
pub const HEADING_UPDATED_EVENT: &str = "headingUpdated";

/// Event emitted for every position fix that passes the accuracy policy.
pub const LOCATION_UPDATED_EVENT: &str = "locationUpdated";

/// Default minimum distance in meters handed to the location provider.
pub const DEFAULT_DISTANCE_FILTER_M: f64 = 5.0;

/// Default accuracy threshold in meters for the location filter.
pub const DEFAULT_DESIRED_ACCURACY_M: f64 = 10.0;

/// Default minimum azimuth change in degrees before a heading is emitted.
pub const DEFAULT_HEADING_FILTER_DEG: f64 = 1.0;

/// Minimum time between location updates requested from the provider.
pub const LOCATION_MIN_TIME_MS: u64 = 1;
