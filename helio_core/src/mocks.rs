//! Test and helper mocks for helio_core

use helio_traits::{ArpScan, HttpGet, LineSource};
use std::collections::VecDeque;
use std::time::Duration;

/// Yields the scripted lines once, then stays quiet forever.
pub struct ScriptedLines {
    lines: VecDeque<String>,
}

impl ScriptedLines {
    pub fn new<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            lines: lines.into_iter().map(Into::into).collect(),
        }
    }
}

impl LineSource for ScriptedLines {
    fn read_line(
        &mut self,
        timeout: Duration,
    ) -> Result<Option<String>, Box<dyn std::error::Error + Send + Sync>> {
        match self.lines.pop_front() {
            Some(line) => Ok(Some(line)),
            None => {
                // Pace the quiet phase so a pumping test loop doesn't spin.
                std::thread::sleep(timeout.min(Duration::from_millis(5)));
                Ok(None)
            }
        }
    }
}

/// Fails on the first read, like a yanked cable.
pub struct FailingSource(pub &'static str);

impl LineSource for FailingSource {
    fn read_line(
        &mut self,
        _timeout: Duration,
    ) -> Result<Option<String>, Box<dyn std::error::Error + Send + Sync>> {
        Err(Box::new(std::io::Error::other(self.0)))
    }
}

/// ARP table fixed to one listing.
pub struct StaticArp(pub String);

impl ArpScan for StaticArp {
    fn table(&mut self) -> Result<String, Box<dyn std::error::Error + Send + Sync>> {
        Ok(self.0.clone())
    }
}

/// HTTP endpoint that always answers with the same body.
pub struct StaticHttp(pub String);

impl HttpGet for StaticHttp {
    fn get(
        &mut self,
        _url: &str,
        _timeout: Duration,
    ) -> Result<String, Box<dyn std::error::Error + Send + Sync>> {
        Ok(self.0.clone())
    }
}

/// HTTP endpoint that always fails.
pub struct FailingHttp(pub &'static str);

impl HttpGet for FailingHttp {
    fn get(
        &mut self,
        _url: &str,
        _timeout: Duration,
    ) -> Result<String, Box<dyn std::error::Error + Send + Sync>> {
        Err(Box::new(std::io::Error::other(self.0)))
    }
}
