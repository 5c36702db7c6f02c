//! Telemetry payload decoding.

use crate::error::HelioError;
use serde::Deserialize;
use serde_json::Value;
use std::collections::BTreeMap;

/// One decoded telemetry payload.
///
/// Both maps are optional on the wire; a payload may update any subset of
/// slots. Keys the panel does not know are carried here but ignored on
/// apply. Readings are transient: parsed, applied, discarded.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct DeviceReading {
    #[serde(default)]
    pub sensors: BTreeMap<String, Value>,
    #[serde(default)]
    pub position: BTreeMap<String, Value>,
}

impl DeviceReading {
    /// Decode one payload line. The offending text is carried in the error
    /// so the info panel can show it verbatim.
    pub fn parse(text: &str) -> Result<Self, HelioError> {
        serde_json::from_str(text).map_err(|e| HelioError::Payload(format!("{e}: {text}")))
    }

    pub fn is_empty(&self) -> bool {
        self.sensors.is_empty() && self.position.is_empty()
    }
}

/// Stringify a scalar the way the panel displays it: bare strings keep
/// their content, everything else renders as its JSON text.
pub fn scalar_text(v: &Value) -> String {
    match v {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_partial_payloads() {
        let r = DeviceReading::parse(r#"{"sensors":{"LG":512}}"#).unwrap();
        assert_eq!(r.sensors.len(), 1);
        assert!(r.position.is_empty());

        let r = DeviceReading::parse("{}").unwrap();
        assert!(r.is_empty());
    }

    #[test]
    fn rejects_non_json_with_the_text_attached() {
        let err = DeviceReading::parse("not-json").unwrap_err();
        assert!(matches!(err, HelioError::Payload(_)));
        assert!(format!("{err}").contains("not-json"));
    }

    #[test]
    fn scalars_render_like_the_panel_shows_them() {
        assert_eq!(scalar_text(&serde_json::json!(512)), "512");
        assert_eq!(scalar_text(&serde_json::json!(10.5)), "10.5");
        assert_eq!(scalar_text(&serde_json::json!("ok")), "ok");
        assert_eq!(scalar_text(&serde_json::json!(null)), "null");
    }
}
