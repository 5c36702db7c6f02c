use helio_core::panel::{POSITION_AXES, SENSOR_KEYS};
use helio_core::{HelioError, Panel};
use rstest::rstest;

#[test]
fn recognized_keys_update_their_slots() {
    let mut panel = Panel::new();
    let reading = panel
        .ingest(r#"{"sensors":{"LG":512,"PG":480},"position":{"X":10,"Y":20}}"#)
        .expect("well-formed payload");
    assert!(!reading.is_empty());

    assert_eq!(panel.sensor("LG"), Some("512"));
    assert_eq!(panel.sensor("PG"), Some("480"));
    assert_eq!(panel.axis("X"), Some("10"));
    assert_eq!(panel.axis("Y"), Some("20"));
    // Slots the payload didn't mention stay unset.
    assert_eq!(panel.sensor("LD"), None);
    assert_eq!(panel.sensor("PD"), None);
}

#[test]
fn missing_keys_keep_their_prior_values() {
    let mut panel = Panel::new();
    panel
        .ingest(r#"{"sensors":{"LG":512,"LD":497},"position":{"X":1}}"#)
        .unwrap();
    panel.ingest(r#"{"sensors":{"LG":500}}"#).unwrap();

    assert_eq!(panel.sensor("LG"), Some("500"));
    assert_eq!(panel.sensor("LD"), Some("497"));
    assert_eq!(panel.axis("X"), Some("1"));
}

#[test]
fn unrecognized_keys_are_silently_ignored() {
    let mut panel = Panel::new();
    panel
        .ingest(r#"{"sensors":{"BOGUS":1,"LG":7},"position":{"Z":9},"extra":true}"#)
        .unwrap();

    assert_eq!(panel.sensor("LG"), Some("7"));
    for (key, value) in panel.slots() {
        if key != "LG" {
            assert_eq!(value, None, "slot {key} must stay unset");
        }
    }
}

#[rstest]
#[case("not-json")]
#[case("")]
#[case("{\"sensors\":")]
#[case("[1,2,3]")]
fn malformed_payloads_change_nothing(#[case] text: &str) {
    let mut panel = Panel::new();
    panel
        .ingest(r#"{"sensors":{"LG":512},"position":{"X":10}}"#)
        .unwrap();
    let before = panel.clone();

    let err = panel.ingest(text).expect_err("must reject");
    assert!(matches!(err, HelioError::Payload(_)));
    assert_eq!(panel, before);
}

#[test]
fn string_scalars_display_unquoted() {
    let mut panel = Panel::new();
    panel
        .ingest(r#"{"sensors":{"LG":"n/a"},"position":{"X":-3.5}}"#)
        .unwrap();
    assert_eq!(panel.sensor("LG"), Some("n/a"));
    assert_eq!(panel.axis("X"), Some("-3.5"));
}

#[test]
fn slot_order_is_sensors_then_axes() {
    let panel = Panel::new();
    let keys: Vec<&str> = panel.slots().map(|(k, _)| k).collect();
    let expected: Vec<&str> = SENSOR_KEYS.iter().chain(POSITION_AXES.iter()).copied().collect();
    assert_eq!(keys, expected);
}
