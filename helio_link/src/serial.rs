//! Serial line source on top of the `serialport` crate.

use crate::error::{LinkError, Result};
use helio_traits::LineSource;
use std::io::Read;
use std::time::Duration;

/// A serial connection framed into newline-delimited text lines.
///
/// The port is opened with the caller's read timeout; `read_line` surfaces
/// a quiet timeout as `Ok(None)` so an idle tracker does not look like a
/// fault. Bytes after the last delimiter are carried over to the next call.
pub struct SerialLine {
    port: Box<dyn serialport::SerialPort>,
    pending: Vec<u8>,
}

impl std::fmt::Debug for SerialLine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SerialLine")
            .field("pending", &self.pending)
            .finish_non_exhaustive()
    }
}

impl SerialLine {
    pub fn open(port: &str, baud: u32, timeout: Duration) -> Result<Self> {
        let handle = serialport::new(port, baud)
            .timeout(timeout)
            .open()
            .map_err(|e| LinkError::Open {
                port: port.to_string(),
                reason: e.to_string(),
            })?;
        tracing::debug!(port, baud, "serial port opened");
        Ok(Self {
            port: handle,
            pending: Vec::new(),
        })
    }

    /// Split one delimited line off the pending buffer, if present.
    fn take_buffered_line(&mut self) -> Result<Option<String>> {
        let Some(pos) = self.pending.iter().position(|&b| b == b'\n') else {
            return Ok(None);
        };
        let mut raw: Vec<u8> = self.pending.drain(..=pos).collect();
        // Drop the delimiter and an optional carriage return before it.
        raw.pop();
        if raw.last() == Some(&b'\r') {
            raw.pop();
        }
        let line = String::from_utf8(raw)
            .map_err(|e| LinkError::Decode(String::from_utf8_lossy(e.as_bytes()).into_owned()))?;
        Ok(Some(line))
    }
}

impl LineSource for SerialLine {
    fn read_line(
        &mut self,
        timeout: Duration,
    ) -> std::result::Result<Option<String>, Box<dyn std::error::Error + Send + Sync>> {
        if self.port.timeout() != timeout
            && let Err(e) = self.port.set_timeout(timeout)
        {
            return Err(Box::new(LinkError::Io(std::io::Error::other(e.to_string()))));
        }
        loop {
            match self.take_buffered_line() {
                Ok(Some(line)) => return Ok(Some(line)),
                Ok(None) => {}
                Err(e) => return Err(Box::new(e)),
            }
            let mut chunk = [0u8; 256];
            match self.port.read(&mut chunk) {
                Ok(0) => return Ok(None),
                Ok(n) => self.pending.extend_from_slice(&chunk[..n]),
                Err(e) if e.kind() == std::io::ErrorKind::TimedOut => return Ok(None),
                Err(e) => return Err(Box::new(LinkError::Io(e))),
            }
        }
    }
}

/// Enumerate serial device names present on the host.
pub fn available_ports() -> Result<Vec<String>> {
    let ports = serialport::available_ports().map_err(|e| LinkError::Command {
        command: "enumerate serial ports".to_string(),
        reason: e.to_string(),
    })?;
    Ok(ports.into_iter().map(|p| p.port_name).collect())
}
