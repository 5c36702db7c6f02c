//! Plain-text and JSON rendering of the panel and its updates.

use helio_core::panel::{POSITION_AXES, SENSOR_KEYS};
use helio_core::{Panel, Update};
use serde_json::json;

/// The original device panel layout: sensors on the left, position on the
/// right, `--` for slots that have not reported yet.
pub fn panel_text(panel: &Panel) -> String {
    let mut out = String::new();
    out.push_str("Sensor  Value     Position  Value\n");
    for row in 0..SENSOR_KEYS.len() {
        let skey = SENSOR_KEYS[row];
        let sval = panel.sensor(skey).unwrap_or("--");
        if row < POSITION_AXES.len() {
            let akey = POSITION_AXES[row];
            let aval = panel.axis(akey).unwrap_or("--");
            out.push_str(&format!("{skey:<7} {sval:<9} {akey:<9} {aval}\n"));
        } else {
            out.push_str(&format!("{skey:<7} {sval}\n"));
        }
    }
    out
}

/// One-line info text per update, in the spirit of the device's info box.
pub fn update_text(update: &Update) -> String {
    match update {
        Update::Applied(reading) => {
            // Echo what the payload touched, compactly.
            let keys: Vec<&str> = reading
                .sensors
                .keys()
                .chain(reading.position.keys())
                .map(String::as_str)
                .collect();
            format!("received data: {}", keys.join(", "))
        }
        Update::Rejected(e) => format!("{e}"),
        Update::SourceFailed(e) => format!("acquisition stopped: {e}"),
        Update::Fault(e) => format!("{e}"),
    }
}

fn panel_json(panel: &Panel) -> serde_json::Value {
    let mut obj = serde_json::Map::new();
    for (key, value) in panel.slots() {
        obj.insert(key.to_string(), value.map_or(json!(null), |v| json!(v)));
    }
    serde_json::Value::Object(obj)
}

/// One JSON line per update, panel snapshot included.
pub fn update_json(update: &Update, panel: &Panel) -> String {
    let obj = match update {
        Update::Applied(_) => json!({ "event": "applied", "panel": panel_json(panel) }),
        Update::Rejected(e) => {
            json!({ "event": "rejected", "error": format!("{e}"), "panel": panel_json(panel) })
        }
        Update::SourceFailed(e) => {
            json!({ "event": "source_failed", "error": format!("{e}") })
        }
        Update::Fault(e) => json!({ "event": "fault", "error": format!("{e}") }),
    };
    obj.to_string()
}
