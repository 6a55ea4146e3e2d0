mod test_host;

use approx::assert_abs_diff_eq;
use locbridge::heading::{HeadingTracker, corrected_azimuth_degrees};
use locbridge::platform::{SensorEvent, SensorType};
use test_host::{
    angular_error_deg, default_module, rotation_sample, sensor_sample, tilted_rotation_vector,
};

#[test]
fn test_roll_corrected_heading_emitted() {
    let mut tracker = HeadingTracker::new(1.0);
    let orientation = [90f64.to_radians(), 0.4, 30f64.to_radians()];
    let heading = corrected_azimuth_degrees(&orientation);
    assert_abs_diff_eq!(heading, 60.0, epsilon = 1e-9);

    let event = tracker.on_azimuth(heading).expect("heading event");
    assert_abs_diff_eq!(event.heading, 60.0, epsilon = 1e-9);
    assert_abs_diff_eq!(tracker.last_emitted_azimuth(), 60.0, epsilon = 1e-9);
}

#[test]
fn test_rolled_sample_heading() {
    let mut tracker = HeadingTracker::new(1.0);
    let sample = SensorEvent {
        sensor: SensorType::RotationVector,
        values: tilted_rotation_vector(90.0, 30.0),
        timestamp_nanos: 0,
    };

    let event = tracker.on_orientation_sample(&sample).expect("heading event");
    assert_abs_diff_eq!(event.heading, 60.0, epsilon = 1e-3);
    assert_abs_diff_eq!(tracker.last_emitted_azimuth(), event.heading);
}

#[test]
fn test_emission_iff_delta_reaches_threshold() {
    let threshold = 2.5;
    let mut tracker = HeadingTracker::new(threshold);
    let sequence = [
        0.0, 1.0, 2.4, 2.5, 4.0, 5.1, 359.0, 358.0, 356.4, 180.0, 181.9, 182.5,
    ];

    let mut prev = tracker.last_emitted_azimuth();
    for azimuth in sequence {
        let emitted = tracker.on_azimuth(azimuth).is_some();
        let expected = (prev - azimuth).abs() >= threshold;
        assert_eq!(
            emitted, expected,
            "azimuth {} after {}: emitted {}",
            azimuth, prev, emitted
        );
        if emitted {
            prev = azimuth;
        }
        assert_eq!(tracker.last_emitted_azimuth(), prev);
    }
}

#[test]
fn test_sensor_path_headings_in_range() {
    let (mut module, rx) = default_module();
    module.start_updating_heading().unwrap();

    let mut azimuth = -180.0;
    while azimuth < 540.0 {
        module.dispatch(rotation_sample(azimuth));
        azimuth += 3.7;
    }

    let events: Vec<_> = rx.try_iter().collect();
    assert!(!events.is_empty());
    for event in events {
        let heading = event.field("heading").expect("heading field");
        assert!((0.0..360.0).contains(&heading), "heading {} out of range", heading);
    }
}

#[test]
fn test_sensor_path_tracks_level_device() {
    let (mut module, rx) = default_module();
    module.start_updating_heading().unwrap();

    for expected in [45.0, 135.0, 225.0, 315.0] {
        module.dispatch(rotation_sample(expected));
        let event = rx.try_recv().expect("heading event");
        assert_eq!(event.name, "headingUpdated");
        let heading = event.field("heading").unwrap();
        assert!(
            angular_error_deg(heading, expected) < 1e-3,
            "expected {}, got {}",
            expected,
            heading
        );
    }
}

#[test]
fn test_foreign_sensors_never_emit() {
    let (mut module, rx) = default_module();
    module.start_updating_heading().unwrap();

    for sensor in [
        SensorType::Accelerometer,
        SensorType::MagneticField,
        SensorType::Gyroscope,
        SensorType::GameRotationVector,
        SensorType::Unknown,
    ] {
        for azimuth in [10.0, 90.0, 200.0] {
            assert!(module.dispatch(sensor_sample(sensor, azimuth)).is_none());
        }
    }

    assert!(rx.try_recv().is_err());
    assert_eq!(module.heading_tracker().last_emitted_azimuth(), 0.0);
}
