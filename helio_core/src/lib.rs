#![cfg_attr(all(not(debug_assertions), not(test)), deny(warnings))]
#![cfg_attr(
    all(not(debug_assertions), not(test)),
    deny(clippy::all, clippy::pedantic, clippy::nursery)
)]
#![allow(clippy::module_name_repetitions, clippy::missing_errors_doc)]
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
//! Device-data ingestion pipeline for the helio solar-tracker monitor.
//!
//! Adapter-agnostic: all I/O goes through the `helio_traits` seams
//! (`LineSource`, `ArpScan`, `HttpGet`).
//!
//! ## Architecture
//!
//! - **Reader**: serial ingestion worker on a dedicated thread (`reader`)
//! - **Poller**: ARP-resolve + HTTP-GET worker on a fixed interval (`poller`)
//! - **Resolution**: MAC → IPv4 scan of ARP listing text (`net`)
//! - **Payloads**: JSON telemetry decoding (`reading`)
//! - **Panel**: last-known-value display state sink (`panel`)
//! - **Controller**: acquisition state machine owning the active worker
//!   (`controller`)

pub mod controller;
pub mod conversions;
pub mod error;
pub mod mocks;
pub mod net;
pub mod panel;
pub mod poller;
pub mod reader;
pub mod reading;

pub use controller::{AcquisitionState, Controller, Update};
pub use error::{HelioError, Result};
pub use panel::Panel;
pub use poller::{NetPoller, PollEvent, PollerCfg};
pub use reader::{LineReader, ReaderEvent};
pub use reading::DeviceReading;
