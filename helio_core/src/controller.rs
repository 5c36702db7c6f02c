//! Acquisition state machine.
//!
//! Owns the panel and at most one active acquisition worker. Mutual
//! exclusion of the serial and polling paths is enforced here with typed
//! state errors, independent of any presentation layer.

use crate::error::{HelioError, Result};
use crate::panel::Panel;
use crate::poller::{NetPoller, PollEvent, PollerCfg};
use crate::reader::{LineReader, ReaderEvent};
use crate::reading::DeviceReading;
use helio_config::MacAddr;
use helio_traits::clock::Clock;
use helio_traits::{ArpScan, HttpGet, LineSource};
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AcquisitionState {
    #[default]
    Idle,
    SerialActive,
    PollingActive,
}

/// Outcome of one pumped event.
#[derive(Debug)]
pub enum Update {
    /// A payload was decoded and applied to the panel.
    Applied(DeviceReading),
    /// A payload was malformed; the panel is untouched.
    Rejected(HelioError),
    /// The serial path died; the controller is back to `Idle`.
    SourceFailed(HelioError),
    /// A polling tick failed; the path stays active.
    Fault(HelioError),
}

#[derive(Default)]
pub struct Controller {
    panel: Panel,
    state: AcquisitionState,
    reader: Option<LineReader>,
    poller: Option<NetPoller>,
}

impl Controller {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> AcquisitionState {
        self.state
    }

    pub fn panel(&self) -> &Panel {
        &self.panel
    }

    /// `Idle → SerialActive`. The `open` closure runs on the worker thread;
    /// open failures arrive as a `SourceFailed` update, per the path's
    /// single-error contract.
    pub fn connect_serial<L, F, C>(&mut self, open: F, timeout: Duration, clock: C) -> Result<()>
    where
        L: LineSource + 'static,
        F: FnOnce() -> std::result::Result<L, Box<dyn std::error::Error + Send + Sync>>
            + Send
            + 'static,
        C: Clock + Send + Sync + 'static,
    {
        self.require_idle("connect serial")?;
        self.reader = Some(LineReader::spawn(open, timeout, clock));
        self.state = AcquisitionState::SerialActive;
        tracing::info!("serial path active");
        Ok(())
    }

    /// `SerialActive → Idle`; joins the worker (bounded by its read timeout).
    pub fn disconnect(&mut self) -> Result<()> {
        if self.state != AcquisitionState::SerialActive {
            return Err(eyre::Report::new(HelioError::State(
                "disconnect: serial path is not active".into(),
            )));
        }
        if let Some(reader) = self.reader.take() {
            reader.stop();
        }
        self.state = AcquisitionState::Idle;
        tracing::info!("serial path stopped");
        Ok(())
    }

    /// `Idle → PollingActive`.
    pub fn start_polling<A, H, C>(
        &mut self,
        arp: A,
        http: H,
        mac: MacAddr,
        cfg: PollerCfg,
        clock: C,
    ) -> Result<()>
    where
        A: ArpScan + Send + 'static,
        H: HttpGet + Send + 'static,
        C: Clock + Send + Sync + 'static,
    {
        self.require_idle("start polling")?;
        self.poller = Some(NetPoller::spawn(arp, http, mac, cfg, clock));
        self.state = AcquisitionState::PollingActive;
        tracing::info!(mac = %mac, "polling path active");
        Ok(())
    }

    /// `PollingActive → Idle`; joins the worker.
    pub fn stop_polling(&mut self) -> Result<()> {
        if self.state != AcquisitionState::PollingActive {
            return Err(eyre::Report::new(HelioError::State(
                "stop polling: polling path is not active".into(),
            )));
        }
        if let Some(poller) = self.poller.take() {
            poller.stop();
        }
        self.state = AcquisitionState::Idle;
        tracing::info!("polling path stopped");
        Ok(())
    }

    /// Drain pending worker events into the panel. A serial `Failed` event
    /// means the worker loop has already exited, so the controller drops it
    /// and returns to `Idle`.
    pub fn pump(&mut self) -> Vec<Update> {
        let mut updates = Vec::new();

        let reader_events = self.reader.as_ref().map(LineReader::try_events);
        if let Some(events) = reader_events {
            let mut path_failed = false;
            for event in events {
                match event {
                    ReaderEvent::Line(text) => updates.push(self.ingest(&text)),
                    ReaderEvent::Failed(e) => {
                        updates.push(Update::SourceFailed(e));
                        path_failed = true;
                    }
                }
            }
            if path_failed {
                self.reader = None;
                self.state = AcquisitionState::Idle;
            }
        }

        let poll_events = self.poller.as_ref().map(NetPoller::try_events);
        if let Some(events) = poll_events {
            for event in events {
                match event {
                    PollEvent::Payload(body) => updates.push(self.ingest(&body)),
                    PollEvent::Fault(e) => updates.push(Update::Fault(e)),
                }
            }
        }

        updates
    }

    fn ingest(&mut self, text: &str) -> Update {
        match self.panel.ingest(text) {
            Ok(reading) => Update::Applied(reading),
            Err(e) => Update::Rejected(e),
        }
    }

    fn require_idle(&self, what: &str) -> Result<()> {
        match self.state {
            AcquisitionState::Idle => Ok(()),
            AcquisitionState::SerialActive => Err(eyre::Report::new(HelioError::State(format!(
                "{what}: serial path is active, disconnect first"
            )))),
            AcquisitionState::PollingActive => Err(eyre::Report::new(HelioError::State(format!(
                "{what}: polling path is active, stop it first"
            )))),
        }
    }
}
