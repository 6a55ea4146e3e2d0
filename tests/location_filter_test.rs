mod test_host;

use locbridge::config::AccuracyPolicy;
use locbridge::location::Provider;
use locbridge::platform::RecordingHost;
use locbridge::{BridgeConfig, HostCallback};
use test_host::{default_module, fix_with_accuracy, module_with};

#[test]
fn test_fixes_below_threshold_suppressed() {
    let (mut module, rx) = default_module();
    module.start_updating_location().unwrap();

    for accuracy in [0.0, 1.0, 4.5, 9.999] {
        let fix = fix_with_accuracy(accuracy);
        assert!(module.dispatch(HostCallback::LocationChanged(fix)).is_none());
        assert_eq!(module.last_fix(), Some(&fix));
    }
    assert!(rx.try_recv().is_err());
}

#[test]
fn test_fix_above_threshold_forwarded() {
    let (mut module, rx) = default_module();
    module.start_updating_location().unwrap();

    module.dispatch(HostCallback::LocationChanged(fix_with_accuracy(15.0)));
    let event = rx.try_recv().expect("location event");
    assert_eq!(event.name, "locationUpdated");
    assert_eq!(event.field("accuracy"), Some(15.0));
    assert_eq!(event.field("longitude"), Some(2.3522));
    assert_eq!(event.field("latitude"), Some(48.8566));
    assert_eq!(event.field("speed"), Some(0.8));
    assert_eq!(event.field("altitude"), Some(35.0));
    assert_eq!(event.field("course"), Some(90.0));

    // stamped with wall-clock time, not the provider's timestamp
    let timestamp = event.field("timestamp").unwrap();
    assert!(timestamp > 1_700_000_000_000.0 + 1000.0);
}

#[test]
fn test_corrected_policy_keeps_precise_fixes() {
    let mut config = BridgeConfig::default();
    config.accuracy_policy = AccuracyPolicy::RejectAboveThreshold;
    let (mut module, rx) = module_with(RecordingHost::new(), config);
    module.start_updating_location().unwrap();

    module.dispatch(HostCallback::LocationChanged(fix_with_accuracy(4.0)));
    module.dispatch(HostCallback::LocationChanged(fix_with_accuracy(40.0)));

    let events: Vec<_> = rx.try_iter().collect();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].field("accuracy"), Some(4.0));
}

#[test]
fn test_desired_accuracy_applies_on_next_start() {
    let (mut module, rx) = default_module();
    module.start_updating_location().unwrap();
    module.set_desired_accuracy(50.0);

    module.dispatch(HostCallback::LocationChanged(fix_with_accuracy(20.0)));
    assert_eq!(rx.try_iter().count(), 1);

    module.start_updating_location().unwrap();
    module.dispatch(HostCallback::LocationChanged(fix_with_accuracy(20.0)));
    assert_eq!(rx.try_iter().count(), 0);
}

#[test]
fn test_invalid_fix_dropped_and_tracking_continues() {
    let (mut module, rx) = default_module();
    module.start_updating_location().unwrap();

    let mut bad = fix_with_accuracy(20.0);
    bad.longitude = 400.0;
    assert!(module.dispatch(HostCallback::LocationChanged(bad)).is_none());
    assert!(
        module
            .dispatch(HostCallback::LocationUnavailable {
                reason: "binder died".into()
            })
            .is_none()
    );
    assert!(module.dispatch(HostCallback::LocationChanged(fix_with_accuracy(20.0))).is_some());
    assert_eq!(rx.try_iter().count(), 1);
}

#[test]
fn test_provider_selection_and_request() {
    let (mut module, _rx) = default_module();
    module.set_distance_filter(25.0);
    module.start_updating_location().unwrap();

    assert_eq!(module.provider(), Provider::Gps);
    let requests = module.host().location_requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].provider, Provider::Gps);
    assert_eq!(requests[0].min_distance_m, 25.0);
    assert_eq!(requests[0].min_time_ms, 1);
}

#[test]
fn test_provider_reselected_on_start() {
    let (mut module, _rx) = default_module();
    module.start_updating_location().unwrap();
    assert_eq!(module.provider(), Provider::Gps);

    module.host_mut().set_provider_enabled(Provider::Gps, false);
    module.start_updating_location().unwrap();
    assert_eq!(module.provider(), Provider::Network);

    let requests = module.host().location_requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].provider, Provider::Network);
}

#[test]
fn test_last_known_fix_seeded_at_construction() {
    let seed = fix_with_accuracy(3.0);
    let host = RecordingHost::new()
        .with_provider(Provider::Gps, false)
        .with_last_known_fix(Provider::Network, seed);
    let (module, rx) = module_with(host, BridgeConfig::default());

    assert_eq!(module.provider(), Provider::Network);
    assert_eq!(module.last_fix(), Some(&seed));
    assert!(rx.try_recv().is_err());
}
