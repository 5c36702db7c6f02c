//! CLI argument definitions and shared statics.

use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;
use std::sync::OnceLock;

pub static FILE_GUARD: OnceLock<tracing_appender::non_blocking::WorkerGuard> = OnceLock::new();
/// Whether the user asked for JSON output (controls structured error output).
pub static JSON_MODE: OnceLock<bool> = OnceLock::new();

/// Config path used when `--config` is not given. A missing default file is
/// not an error; built-in defaults apply.
pub const DEFAULT_CONFIG_PATH: &str = "etc/helio.toml";

#[derive(Parser, Debug)]
#[command(name = "helio", version, about = "Solar tracker monitor CLI")]
pub struct Cli {
    /// Path to config TOML (typed)
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Emit updates and errors as JSON lines instead of plain text
    #[arg(long, action = ArgAction::SetTrue)]
    pub json: bool,

    /// Console log level (error|warn|info|debug|trace)
    #[arg(long = "log-level", value_name = "LEVEL", default_value = "info")]
    pub log_level: String,

    /// Command to execute
    #[command(subcommand)]
    pub cmd: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List serial devices present on this host
    Ports,
    /// Read telemetry from the serial link and keep the panel current
    Watch {
        /// Serial device (overrides [serial].port)
        #[arg(long)]
        port: Option<String>,
        /// Line speed (overrides [serial].baud; must be a supported rate)
        #[arg(long)]
        baud: Option<u32>,
        /// Run against a scripted tracker instead of real hardware
        #[arg(long, action = ArgAction::SetTrue)]
        sim: bool,
        /// Stop after this many applied updates instead of running until Ctrl-C
        #[arg(long, value_name = "N")]
        max_updates: Option<u64>,
    },
    /// Poll telemetry over HTTP from the MAC-resolved tracker address
    Poll {
        /// Tracker MAC address (overrides [network].mac)
        #[arg(long)]
        mac: Option<String>,
        /// Stop after this many applied updates instead of running until Ctrl-C
        #[arg(long, value_name = "N")]
        max_updates: Option<u64>,
    },
    /// Drive the panel from a file of payload lines and print the result
    Replay {
        /// File with one JSON payload per line
        file: PathBuf,
    },
    /// Quick health check (config, port enumeration, HTTP client)
    SelfCheck,
}
