//! Serial ingestion worker.
//!
//! Spawns a thread that owns the `LineSource`, forwards each decoded line
//! through an unbounded channel, and tracks the last-ok timestamp for
//! staleness queries. One read error ends the path: the worker emits a
//! single `Failed` event and exits its loop.
//!
//! Safety: each `LineReader` spawns exactly one thread that is shut down
//! when the `LineReader` is dropped, preventing thread leaks. Stop latency
//! is bounded by the per-read timeout.

use crate::error::{HelioError, classify_link_error};
use crossbeam_channel as xch;
use helio_traits::LineSource;
use helio_traits::clock::Clock;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::time::{Duration, Instant};

/// What the worker sends to its consumer.
#[derive(Debug)]
pub enum ReaderEvent {
    /// One whitespace-trimmed payload line.
    Line(String),
    /// The path died: open or read failed. Exactly one per worker, last.
    Failed(HelioError),
}

pub struct LineReader {
    rx: xch::Receiver<ReaderEvent>,
    last_ok: Arc<AtomicU64>,
    epoch: Instant,
    /// Shutdown flag for immediate response (atomic for lock-free check)
    shutdown: Arc<AtomicBool>,
    /// Join handle for graceful thread cleanup
    join_handle: Option<std::thread::JoinHandle<()>>,
}

impl LineReader {
    /// Spawn the worker. `open` runs on the worker thread so that a failed
    /// open surfaces as a `Failed` event like any mid-read fault, not as a
    /// constructor error on the caller's thread.
    pub fn spawn<L, F, C>(open: F, timeout: Duration, clock: C) -> Self
    where
        L: LineSource + 'static,
        F: FnOnce() -> Result<L, Box<dyn std::error::Error + Send + Sync>> + Send + 'static,
        C: Clock + Send + Sync + 'static,
    {
        let (tx, rx) = xch::unbounded();
        let shutdown = Arc::new(AtomicBool::new(false));
        let shutdown_clone = shutdown.clone();
        let last_ok = Arc::new(AtomicU64::new(0));
        let last_ok_clone = last_ok.clone();
        let epoch = clock.now();

        let join_handle = std::thread::spawn(move || {
            let mut source = match open() {
                Ok(s) => s,
                Err(e) => {
                    let _ = tx.send(ReaderEvent::Failed(classify_link_error(e.as_ref())));
                    tracing::debug!("line reader failed to open its source");
                    return;
                }
            };
            loop {
                // Immediate shutdown check (lock-free atomic)
                if shutdown_clone.load(Ordering::Relaxed) {
                    tracing::debug!("line reader received shutdown signal");
                    break;
                }

                match source.read_line(timeout) {
                    Ok(Some(line)) => {
                        let line = line.trim();
                        // Timeout framing can split a delimiter off on its
                        // own; blank lines carry no payload.
                        if line.is_empty() {
                            continue;
                        }
                        // If send fails, consumer is gone; exit gracefully
                        if tx.send(ReaderEvent::Line(line.to_string())).is_err() {
                            tracing::debug!("line reader consumer disconnected, exiting thread");
                            break;
                        }
                        let now = clock.ms_since(epoch);
                        last_ok_clone.store(now, Ordering::Relaxed);
                    }
                    Ok(None) => {
                        // Quiet interval; nothing arrived within the timeout.
                    }
                    Err(e) => {
                        let _ = tx.send(ReaderEvent::Failed(classify_link_error(e.as_ref())));
                        break;
                    }
                }
            }
            tracing::trace!("line reader thread exiting cleanly");
        });

        Self {
            rx,
            last_ok,
            epoch,
            shutdown,
            join_handle: Some(join_handle),
        }
    }

    /// Drain everything currently pending, without blocking.
    pub fn try_events(&self) -> Vec<ReaderEvent> {
        self.rx.try_iter().collect()
    }

    /// Block up to `wait` for the next event.
    pub fn recv_timeout(&self, wait: Duration) -> Option<ReaderEvent> {
        self.rx.recv_timeout(wait).ok()
    }

    /// Milliseconds since the last successfully forwarded line.
    pub fn stalled_for_now(&self) -> u64 {
        let now_ms = {
            let dur = Instant::now().saturating_duration_since(self.epoch);
            let ms = dur.as_millis();
            (ms.min(u128::from(u64::MAX))) as u64
        };
        now_ms.saturating_sub(self.last_ok.load(Ordering::Relaxed))
    }

    /// Request shutdown and block until the worker thread has exited.
    /// Bounded by the per-read timeout plus join overhead.
    pub fn stop(self) {
        drop(self);
    }
}

impl Drop for LineReader {
    fn drop(&mut self) {
        // Signal shutdown immediately; the thread notices between reads.
        self.shutdown.store(true, Ordering::Relaxed);

        // The thread exits:
        // 1. Immediately if it's between reads (checking the flag)
        // 2. After the in-flight read_line() completes, bounded by its timeout
        if let Some(handle) = self.join_handle.take() {
            match handle.join() {
                Ok(()) => {
                    tracing::trace!("line reader thread joined successfully");
                }
                Err(e) => {
                    // Thread panicked; log but don't propagate (we're in Drop)
                    tracing::warn!(?e, "line reader thread panicked during shutdown");
                }
            }
        }
    }
}
