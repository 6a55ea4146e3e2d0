#![allow(dead_code)]

use crossbeam_channel::Receiver;
use locbridge::events::{ChannelSink, EmittedEvent};
use locbridge::heading::rotation_vector_for_azimuth;
use locbridge::location::PositionFix;
use locbridge::platform::{RecordingHost, SensorEvent, SensorType};
use locbridge::{BridgeConfig, HostCallback, LocationModule};

pub fn module_with(
    host: RecordingHost,
    config: BridgeConfig,
) -> (LocationModule<RecordingHost>, Receiver<EmittedEvent>) {
    let (tx, rx) = crossbeam_channel::unbounded();
    let module = LocationModule::new(host, Box::new(ChannelSink::new(tx)), config);
    (module, rx)
}

pub fn default_module() -> (LocationModule<RecordingHost>, Receiver<EmittedEvent>) {
    module_with(RecordingHost::new(), BridgeConfig::default())
}

pub fn sensor_sample(sensor: SensorType, azimuth_degrees: f64) -> HostCallback {
    HostCallback::SensorChanged(SensorEvent {
        sensor,
        values: rotation_vector_for_azimuth(azimuth_degrees).to_vec(),
        timestamp_nanos: 0,
    })
}

pub fn rotation_sample(azimuth_degrees: f64) -> HostCallback {
    sensor_sample(SensorType::RotationVector, azimuth_degrees)
}

/// Rotation vector of a device facing `azimuth_degrees` and rolled about its y axis
pub fn tilted_rotation_vector(azimuth_degrees: f64, roll_degrees: f64) -> Vec<f32> {
    let (sa, ca) = (azimuth_degrees.to_radians() / 2.0).sin_cos();
    let (sr, cr) = (roll_degrees.to_radians() / 2.0).sin_cos();
    vec![
        (sa * sr) as f32,
        (ca * sr) as f32,
        (-cr * sa) as f32,
        (ca * cr) as f32,
    ]
}

pub fn fix_with_accuracy(accuracy_m: f64) -> PositionFix {
    PositionFix {
        longitude: 2.3522,
        latitude: 48.8566,
        speed_mps: 0.8,
        altitude_m: 35.0,
        horizontal_accuracy_m: accuracy_m,
        bearing_degrees: 90.0,
        timestamp_millis: 1_700_000_000_000,
    }
}

pub fn angular_error_deg(measured: f64, expected: f64) -> f64 {
    let mut err = (measured - expected).abs();
    if err > 180.0 {
        err = 360.0 - err;
    }
    err
}
