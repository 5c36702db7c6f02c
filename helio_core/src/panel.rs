//! Last-known-value display state sink.

use crate::error::HelioError;
use crate::reading::{DeviceReading, scalar_text};

/// Sensor slots, in display order: left/right upper, left/right lower.
pub const SENSOR_KEYS: [&str; 4] = ["LG", "PG", "LD", "PD"];
/// Mount position axes.
pub const POSITION_AXES: [&str; 2] = ["X", "Y"];

/// The display model: one slot per known sensor and axis, holding the
/// last-known stringified value. Mutated only by applied readings; a
/// rejected payload leaves every slot as it was.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Panel {
    sensors: [Option<String>; 4],
    position: [Option<String>; 2],
}

impl Panel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sensor(&self, key: &str) -> Option<&str> {
        let idx = SENSOR_KEYS.iter().position(|k| *k == key)?;
        self.sensors[idx].as_deref()
    }

    pub fn axis(&self, key: &str) -> Option<&str> {
        let idx = POSITION_AXES.iter().position(|k| *k == key)?;
        self.position[idx].as_deref()
    }

    /// Apply a decoded reading: recognized keys overwrite their slot,
    /// unknown keys are ignored, absent keys keep their prior value.
    /// Returns the number of slots written.
    pub fn apply(&mut self, reading: &DeviceReading) -> usize {
        let mut written = 0;
        for (key, value) in &reading.sensors {
            if let Some(idx) = SENSOR_KEYS.iter().position(|k| *k == key.as_str()) {
                self.sensors[idx] = Some(scalar_text(value));
                written += 1;
            }
        }
        for (key, value) in &reading.position {
            if let Some(idx) = POSITION_AXES.iter().position(|k| *k == key.as_str()) {
                self.position[idx] = Some(scalar_text(value));
                written += 1;
            }
        }
        written
    }

    /// Decode and apply one payload line. On malformed input nothing is
    /// written and the error carries the offending text.
    pub fn ingest(&mut self, text: &str) -> Result<DeviceReading, HelioError> {
        let reading = DeviceReading::parse(text)?;
        self.apply(&reading);
        Ok(reading)
    }

    /// Sensor slots then axis slots, in display order.
    pub fn slots(&self) -> impl Iterator<Item = (&'static str, Option<&str>)> {
        SENSOR_KEYS
            .iter()
            .zip(self.sensors.iter())
            .chain(POSITION_AXES.iter().zip(self.position.iter()))
            .map(|(k, v)| (*k, v.as_deref()))
    }
}
