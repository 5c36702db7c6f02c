//! I/O adapters for the helio monitor.
//!
//! Everything platform-facing lives here: the serialport-backed line
//! source, the system ARP table invocation, the blocking HTTP client, and
//! the scripted source used by the simulation path. The rest of the stack
//! only sees the `helio_traits` seams.

pub mod arp;
pub mod error;
pub mod http;
pub mod serial;
pub mod sim;

pub use arp::SystemArpTable;
pub use error::LinkError;
pub use http::HttpClient;
pub use serial::{SerialLine, available_ports};
pub use sim::ScriptedLineSource;
