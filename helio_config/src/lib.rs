#![cfg_attr(all(not(debug_assertions), not(test)), deny(warnings))]
#![cfg_attr(
    all(not(debug_assertions), not(test)),
    deny(clippy::all, clippy::pedantic, clippy::nursery)
)]
#![allow(clippy::module_name_repetitions, clippy::missing_errors_doc)]
//! Config schemas for the helio monitor.
//!
//! - `Config` and sub-structs are deserialized from TOML and validated.
//! - `MacAddr` accepts `:` or `-` separators and renders the normalized
//!   lowercase colon form used for ARP-table matching.

use serde::Deserialize;
use serde::de::{Deserializer, Error as DeError};
use std::fmt;
use std::str::FromStr;

/// The fixed set of baud rates the device-side firmware supports.
pub const BAUD_RATES: [u32; 9] = [
    9_600, 14_400, 19_200, 38_400, 57_600, 115_200, 230_400, 460_800, 921_600,
];

/// A MAC address, stored as raw octets.
///
/// Parsing accepts six two-digit hex octets separated by `:` or `-`, any
/// case. Display renders the normalized lowercase colon form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MacAddr([u8; 6]);

impl MacAddr {
    pub const fn octets(&self) -> [u8; 6] {
        self.0
    }

    /// Normalized rendering, e.g. `9c:9c:1f:c5:77:d4`.
    pub fn normalized(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for MacAddr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let o = &self.0;
        write!(
            f,
            "{:02x}:{:02x}:{:02x}:{:02x}:{:02x}:{:02x}",
            o[0], o[1], o[2], o[3], o[4], o[5]
        )
    }
}

impl FromStr for MacAddr {
    type Err = eyre::Report;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.trim().split(['-', ':']).collect();
        if parts.len() != 6 {
            eyre::bail!("MAC address must have 6 octets, got {}: {s:?}", parts.len());
        }
        let mut octets = [0u8; 6];
        for (i, part) in parts.iter().enumerate() {
            if part.len() != 2 {
                eyre::bail!("MAC octet {} must be two hex digits, got {part:?}", i + 1);
            }
            octets[i] = u8::from_str_radix(part, 16)
                .map_err(|_| eyre::eyre!("MAC octet {} is not hex: {part:?}", i + 1))?;
        }
        Ok(Self(octets))
    }
}

impl<'de> Deserialize<'de> for MacAddr {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(|e| D::Error::custom(format!("{e}")))
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Serial {
    /// Serial device path, e.g. `/dev/ttyUSB0` or `COM3`.
    pub port: Option<String>,
    /// Line speed; must be one of `BAUD_RATES`.
    pub baud: u32,
    /// Per-read timeout (ms); bounds reader stop latency.
    pub read_timeout_ms: u64,
}

impl Default for Serial {
    fn default() -> Self {
        Self {
            port: None,
            baud: 9_600,
            read_timeout_ms: 1_000,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Network {
    /// Tracker MAC address, matched against the host ARP table.
    pub mac: MacAddr,
    /// Interval between polling ticks (ms).
    pub poll_ms: u64,
    /// Per-request HTTP timeout (ms).
    pub http_timeout_ms: u64,
    /// Path of the telemetry endpoint on the resolved host.
    pub data_path: String,
}

impl Default for Network {
    fn default() -> Self {
        Self {
            // Factory-default tracker MAC, same prefill the panel ships with.
            mac: MacAddr([0x9c, 0x9c, 0x1f, 0xc5, 0x77, 0xd4]),
            poll_ms: 1_000,
            http_timeout_ms: 1_000,
            data_path: "/data".to_string(),
        }
    }
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct Logging {
    pub file: Option<String>,  // path to .log (JSON lines)
    pub level: Option<String>, // "info","debug"
    /// Log rotation policy: "never" | "daily" | "hourly" (default: never)
    pub rotation: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub serial: Serial,
    pub network: Network,
    pub logging: Logging,
}

pub fn load_toml(s: &str) -> Result<Config, toml::de::Error> {
    toml::from_str::<Config>(s)
}

impl Config {
    pub fn validate(&self) -> eyre::Result<()> {
        // Serial
        if !BAUD_RATES.contains(&self.serial.baud) {
            eyre::bail!(
                "serial.baud must be one of {:?}, got {}",
                BAUD_RATES,
                self.serial.baud
            );
        }
        if self.serial.read_timeout_ms == 0 {
            eyre::bail!("serial.read_timeout_ms must be >= 1");
        }
        if self.serial.read_timeout_ms > 60_000 {
            eyre::bail!("serial.read_timeout_ms is unreasonably large (>60s)");
        }

        // Network
        if self.network.poll_ms == 0 {
            eyre::bail!("network.poll_ms must be >= 1");
        }
        if self.network.http_timeout_ms == 0 {
            eyre::bail!("network.http_timeout_ms must be >= 1");
        }
        if !self.network.data_path.starts_with('/') {
            eyre::bail!("network.data_path must start with '/'");
        }

        Ok(())
    }
}
