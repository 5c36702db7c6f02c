//! Scripted line source for the simulation path.

use helio_traits::LineSource;
use std::time::Duration;

/// Emits a canned sequence of payload lines at a fixed cadence, cycling
/// forever. Stands in for a live tracker when no hardware is attached.
pub struct ScriptedLineSource {
    lines: Vec<String>,
    next: usize,
    cadence: Duration,
}

impl ScriptedLineSource {
    pub fn new(lines: Vec<String>, cadence: Duration) -> Self {
        Self {
            lines,
            next: 0,
            cadence,
        }
    }

    /// A plausible telemetry sequence: light sensors settling while the
    /// mount walks toward the sun.
    pub fn tracker_demo(cadence: Duration) -> Self {
        let lines = vec![
            r#"{"sensors":{"LG":512,"PG":480,"LD":497,"PD":503},"position":{"X":0,"Y":0}}"#,
            r#"{"sensors":{"LG":506,"PG":488},"position":{"X":4,"Y":1}}"#,
            r#"{"sensors":{"LD":499,"PD":500},"position":{"X":7,"Y":3}}"#,
            r#"{"sensors":{"LG":501,"PG":499,"LD":500,"PD":500},"position":{"X":9,"Y":4}}"#,
        ];
        Self::new(lines.into_iter().map(String::from).collect(), cadence)
    }
}

impl LineSource for ScriptedLineSource {
    fn read_line(
        &mut self,
        timeout: Duration,
    ) -> Result<Option<String>, Box<dyn std::error::Error + Send + Sync>> {
        if self.lines.is_empty() {
            std::thread::sleep(timeout);
            return Ok(None);
        }
        std::thread::sleep(self.cadence.min(timeout));
        let line = self.lines[self.next % self.lines.len()].clone();
        self.next = self.next.wrapping_add(1);
        Ok(Some(line))
    }
}
