pub mod clock;

pub use clock::{Clock, ManualClock, MonotonicClock};

/// A device link yielding newline-delimited text frames.
///
/// `read_line` blocks for at most `timeout`. A quiet link is not an error:
/// `Ok(None)` means no complete line arrived within the timeout and the
/// caller should simply try again. `Err` is reserved for real faults (port
/// gone, decode failure) after which the source is not usable.
pub trait LineSource {
    fn read_line(
        &mut self,
        timeout: std::time::Duration,
    ) -> Result<Option<String>, Box<dyn std::error::Error + Send + Sync>>;
}

/// Access to the host's ARP table as raw listing text.
pub trait ArpScan {
    fn table(&mut self) -> Result<String, Box<dyn std::error::Error + Send + Sync>>;
}

/// Minimal HTTP GET returning the response body as text.
///
/// Implementations must treat non-success statuses as errors.
pub trait HttpGet {
    fn get(
        &mut self,
        url: &str,
        timeout: std::time::Duration,
    ) -> Result<String, Box<dyn std::error::Error + Send + Sync>>;
}
