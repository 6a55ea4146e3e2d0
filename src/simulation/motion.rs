//! Synthetic sessions: a walker turning at a steady rate.
//!
//! Heading samples follow `initial + turn_rate * t` with Gaussian jitter;
//! fixes advance along the current heading at constant speed with a
//! Gaussian accuracy radius. Seeded sessions are reproducible.

use rand::RngExt;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rand_distr::{Distribution, Normal};

use crate::bridge::HostCallback;
use crate::error::{BridgeError, Result};
use crate::heading::rotation_vector_for_azimuth;
use crate::location::PositionFix;
use crate::platform::{SensorEvent, SensorType};
use crate::source::CallbackSource;

const METERS_PER_DEGREE_LATITUDE: f64 = 111_320.0;

/// Upper bound on callbacks in one generated session
pub const MAX_SESSION_CALLBACKS: usize = 10_000_000;

#[derive(Clone, Debug, serde::Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    pub seed: Option<u64>,
    pub duration_secs: f64,
    /// Rotation-vector samples per second
    pub sensor_rate_hz: f64,
    /// Seconds between position fixes
    pub fix_interval_secs: f64,
    pub start_latitude: f64,
    pub start_longitude: f64,
    pub start_time_millis: i64,
    pub initial_heading_deg: f64,
    pub turn_rate_deg_per_sec: f64,
    /// Standard deviation of heading noise in degrees
    pub heading_jitter_deg: f64,
    pub speed_mps: f64,
    pub accuracy_mean_m: f64,
    pub accuracy_std_m: f64,
    /// Probability that a fix is replaced by a provider dropout
    pub dropout_probability: f64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            seed: None,
            duration_secs: 60.0,
            sensor_rate_hz: 50.0,
            fix_interval_secs: 1.0,
            start_latitude: 37.4220,
            start_longitude: -122.0841,
            start_time_millis: 1_700_000_000_000,
            initial_heading_deg: 0.0,
            turn_rate_deg_per_sec: 6.0,
            heading_jitter_deg: 0.5,
            speed_mps: 1.4,
            accuracy_mean_m: 12.0,
            accuracy_std_m: 4.0,
            dropout_probability: 0.02,
        }
    }
}

impl SessionConfig {
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_duration(mut self, duration_secs: f64) -> Self {
        self.duration_secs = duration_secs;
        self
    }

    fn validate(&self) -> Result<()> {
        if !(self.sensor_rate_hz > 0.0) || !(self.fix_interval_secs > 0.0) {
            return Err(BridgeError::Config(
                "sensor rate and fix interval must be positive".into(),
            ));
        }
        if !self.duration_secs.is_finite() || self.duration_secs < 0.0 {
            return Err(BridgeError::Config(
                "duration must be finite and not negative".into(),
            ));
        }
        for (name, value) in [
            ("heading jitter", self.heading_jitter_deg),
            ("accuracy mean", self.accuracy_mean_m),
            ("accuracy spread", self.accuracy_std_m),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(BridgeError::Config(format!(
                    "{} must be finite and not negative, got {}",
                    name, value
                )));
            }
        }
        let callbacks = self.duration_secs * self.sensor_rate_hz
            + self.duration_secs / self.fix_interval_secs;
        if !(callbacks <= MAX_SESSION_CALLBACKS as f64) {
            return Err(BridgeError::Config(format!(
                "session would produce {:.0} callbacks, limit is {}",
                callbacks, MAX_SESSION_CALLBACKS
            )));
        }
        if !(0.0..=1.0).contains(&self.dropout_probability) {
            return Err(BridgeError::Config(
                "dropout probability must be within 0-1".into(),
            ));
        }
        Ok(())
    }
}

fn create_rng(seed: Option<u64>) -> ChaCha8Rng {
    match seed {
        Some(s) => ChaCha8Rng::seed_from_u64(s),
        None => rand::make_rng(),
    }
}

fn normal(mean: f64, std_dev: f64) -> Result<Normal<f64>> {
    Normal::new(mean, std_dev).map_err(|e| BridgeError::Config(format!("{}: {}", std_dev, e)))
}

/// Generate a session's callbacks in delivery order
pub fn generate_session(config: &SessionConfig) -> Result<Vec<HostCallback>> {
    config.validate()?;

    let mut rng = create_rng(config.seed);
    let jitter = normal(0.0, config.heading_jitter_deg)?;
    let accuracy = normal(config.accuracy_mean_m, config.accuracy_std_m)?;

    let heading_at = |t: f64| config.initial_heading_deg + config.turn_rate_deg_per_sec * t;
    let mut timed: Vec<(i64, HostCallback)> = Vec::new();

    let sensor_count = (config.duration_secs * config.sensor_rate_hz) as usize;
    for i in 0..sensor_count {
        let t = i as f64 / config.sensor_rate_hz;
        let heading = heading_at(t) + jitter.sample(&mut rng);
        let nanos = (t * 1e9) as i64;
        timed.push((
            nanos,
            HostCallback::SensorChanged(SensorEvent {
                sensor: SensorType::RotationVector,
                values: rotation_vector_for_azimuth(heading).to_vec(),
                timestamp_nanos: nanos,
            }),
        ));
    }

    let mut latitude = config.start_latitude;
    let mut longitude = config.start_longitude;
    let fix_count = (config.duration_secs / config.fix_interval_secs) as usize;
    for i in 0..fix_count {
        let t = i as f64 * config.fix_interval_secs;
        let course = heading_at(t).rem_euclid(360.0);
        let step = config.speed_mps * config.fix_interval_secs;

        latitude += step * course.to_radians().cos() / METERS_PER_DEGREE_LATITUDE;
        longitude += step * course.to_radians().sin()
            / (METERS_PER_DEGREE_LATITUDE * latitude.to_radians().cos());

        let nanos = (t * 1e9) as i64;
        let callback = if rng.random::<f64>() < config.dropout_probability {
            HostCallback::LocationUnavailable {
                reason: "simulated provider dropout".into(),
            }
        } else {
            HostCallback::LocationChanged(PositionFix {
                longitude,
                latitude,
                speed_mps: config.speed_mps,
                altitude_m: 30.0,
                horizontal_accuracy_m: accuracy.sample(&mut rng).max(1.0),
                bearing_degrees: course,
                timestamp_millis: config.start_time_millis + (t * 1000.0) as i64,
            })
        };
        timed.push((nanos, callback));
    }

    timed.sort_by_key(|(nanos, _)| *nanos);
    Ok(timed.into_iter().map(|(_, callback)| callback).collect())
}

/// Source that replays a generated session
pub struct SimulatedSource {
    callbacks: std::vec::IntoIter<HostCallback>,
}

impl SimulatedSource {
    pub fn new(config: &SessionConfig) -> Result<Self> {
        Ok(Self {
            callbacks: generate_session(config)?.into_iter(),
        })
    }
}

impl CallbackSource for SimulatedSource {
    fn next_callback(&mut self) -> anyhow::Result<Option<HostCallback>> {
        Ok(self.callbacks.next())
    }
}
