//! Network polling worker.
//!
//! Each tick resolves the configured MAC against the host ARP table, GETs
//! the telemetry endpoint on the resolved address, and forwards the body
//! exactly like a serial line. Ticks are independent: a fault is reported
//! and the next tick starts from scratch, with no backoff and no state.
//!
//! Unlike the serial path, faults never end the worker; only `stop()` or
//! drop does. An in-flight request is not cancelled, so stop latency is
//! bounded by interval + HTTP timeout.

use crate::error::{HelioError, classify_link_error};
use crate::net::resolve_ipv4;
use crossbeam_channel as xch;
use helio_config::MacAddr;
use helio_traits::clock::Clock;
use helio_traits::{ArpScan, HttpGet};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

/// Polling parameters, fixed per session.
#[derive(Debug, Clone)]
pub struct PollerCfg {
    /// Pause between ticks.
    pub interval: Duration,
    /// Per-request HTTP timeout.
    pub http_timeout: Duration,
    /// Endpoint path on the resolved host.
    pub data_path: String,
}

impl Default for PollerCfg {
    fn default() -> Self {
        Self {
            interval: Duration::from_millis(1_000),
            http_timeout: Duration::from_millis(1_000),
            data_path: "/data".to_string(),
        }
    }
}

/// What each tick produces.
#[derive(Debug)]
pub enum PollEvent {
    /// Response body, consumed identically to a serial line.
    Payload(String),
    /// This tick failed (ARP miss, HTTP error); the next one proceeds.
    Fault(HelioError),
}

pub struct NetPoller {
    rx: xch::Receiver<PollEvent>,
    shutdown: Arc<AtomicBool>,
    join_handle: Option<std::thread::JoinHandle<()>>,
}

impl NetPoller {
    pub fn spawn<A, H, C>(mut arp: A, mut http: H, mac: MacAddr, cfg: PollerCfg, clock: C) -> Self
    where
        A: ArpScan + Send + 'static,
        H: HttpGet + Send + 'static,
        C: Clock + Send + Sync + 'static,
    {
        let (tx, rx) = xch::unbounded();
        let shutdown = Arc::new(AtomicBool::new(false));
        let shutdown_clone = shutdown.clone();

        let join_handle = std::thread::spawn(move || {
            loop {
                if shutdown_clone.load(Ordering::Relaxed) {
                    tracing::debug!("poller received shutdown signal");
                    break;
                }

                let event = tick(&mut arp, &mut http, &mac, &cfg);
                if let PollEvent::Fault(e) = &event {
                    tracing::debug!(error = %e, "poll tick failed");
                }
                // If send fails, consumer is gone; exit gracefully
                if tx.send(event).is_err() {
                    tracing::debug!("poller consumer disconnected, exiting thread");
                    break;
                }

                // Check shutdown before sleep to avoid unnecessary delay
                if shutdown_clone.load(Ordering::Relaxed) {
                    break;
                }
                clock.sleep(cfg.interval);
            }
            tracing::trace!("poller thread exiting cleanly");
        });

        Self {
            rx,
            shutdown,
            join_handle: Some(join_handle),
        }
    }

    /// Drain everything currently pending, without blocking.
    pub fn try_events(&self) -> Vec<PollEvent> {
        self.rx.try_iter().collect()
    }

    /// Block up to `wait` for the next event.
    pub fn recv_timeout(&self, wait: Duration) -> Option<PollEvent> {
        self.rx.recv_timeout(wait).ok()
    }

    /// Request shutdown and block until the worker thread has exited.
    pub fn stop(self) {
        drop(self);
    }
}

/// One complete tick: resolve, fetch, forward.
fn tick<A: ArpScan, H: HttpGet>(
    arp: &mut A,
    http: &mut H,
    mac: &MacAddr,
    cfg: &PollerCfg,
) -> PollEvent {
    let table = match arp.table() {
        Ok(t) => t,
        Err(e) => return PollEvent::Fault(classify_link_error(e.as_ref())),
    };
    let Some(ip) = resolve_ipv4(&table, mac) else {
        return PollEvent::Fault(HelioError::ArpMiss(mac.normalized()));
    };
    let url = format!("http://{ip}{}", cfg.data_path);
    match http.get(&url, cfg.http_timeout) {
        Ok(body) => PollEvent::Payload(body),
        Err(e) => PollEvent::Fault(classify_link_error(e.as_ref())),
    }
}

impl Drop for NetPoller {
    fn drop(&mut self) {
        self.shutdown.store(true, Ordering::Relaxed);
        if let Some(handle) = self.join_handle.take() {
            match handle.join() {
                Ok(()) => {
                    tracing::trace!("poller thread joined successfully");
                }
                Err(e) => {
                    tracing::warn!(?e, "poller thread panicked during shutdown");
                }
            }
        }
    }
}
