//! Acquisition commands: assemble adapters, drive the controller, render.

use crate::render;
use eyre::WrapErr;
use helio_config::{BAUD_RATES, Config, MacAddr};
use helio_core::error::Result;
use helio_core::{AcquisitionState, Controller, Panel, PollerCfg, Update};
use helio_link::{HttpClient, ScriptedLineSource, SerialLine, SystemArpTable};
use helio_traits::MonotonicClock;
use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

/// How often the foreground loop drains worker events.
const PUMP_INTERVAL: Duration = Duration::from_millis(50);
/// Cadence of the scripted tracker used by `--sim`.
const SIM_CADENCE: Duration = Duration::from_millis(200);

pub fn run_watch(
    cfg: &Config,
    json: bool,
    port: Option<String>,
    baud: Option<u32>,
    sim: bool,
    max_updates: Option<u64>,
) -> Result<()> {
    let timeout = Duration::from_millis(cfg.serial.read_timeout_ms);
    let baud = baud.unwrap_or(cfg.serial.baud);
    if !BAUD_RATES.contains(&baud) {
        eyre::bail!("serial.baud must be one of {BAUD_RATES:?}, got {baud}");
    }

    let mut ctl = Controller::new();
    if sim {
        ctl.connect_serial(
            move || Ok(ScriptedLineSource::tracker_demo(SIM_CADENCE)),
            timeout,
            MonotonicClock::new(),
        )?;
        if !json {
            println!("connected to scripted tracker");
        }
    } else {
        let Some(port) = port.or_else(|| cfg.serial.port.clone()) else {
            eyre::bail!(
                "no serial port selected; pass --port or set [serial].port (try `helio_cli ports`)"
            );
        };
        tracing::info!(port, baud, "connecting");
        let port_for_open = port.clone();
        ctl.connect_serial(
            move || {
                SerialLine::open(&port_for_open, baud, timeout)
                    .map_err(|e| Box::new(e) as Box<dyn std::error::Error + Send + Sync>)
            },
            timeout,
            MonotonicClock::new(),
        )?;
        if !json {
            println!("connected to {port} at {baud} baud");
        }
    }

    drive(&mut ctl, json, max_updates)
}

pub fn run_poll(
    cfg: &Config,
    json: bool,
    mac_override: Option<String>,
    max_updates: Option<u64>,
) -> Result<()> {
    let mac: MacAddr = match mac_override {
        Some(s) => s.parse()?,
        None => cfg.network.mac,
    };
    let http = HttpClient::new()?;
    let mut ctl = Controller::new();
    ctl.start_polling(
        SystemArpTable::new(),
        http,
        mac,
        PollerCfg::from(&cfg.network),
        MonotonicClock::new(),
    )?;
    if !json {
        println!("polling {mac} every {} ms", cfg.network.poll_ms);
    }

    drive(&mut ctl, json, max_updates)
}

/// Feed a file of payload lines through a fresh panel. Each line is
/// independent: malformed ones are reported and skipped, like live data.
pub fn run_replay(file: &Path, json: bool) -> Result<()> {
    let text =
        std::fs::read_to_string(file).wrap_err_with(|| format!("read replay file {file:?}"))?;
    let mut panel = Panel::new();
    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let update = match panel.ingest(line) {
            Ok(reading) => Update::Applied(reading),
            Err(e) => Update::Rejected(e),
        };
        emit(&update, &panel, json);
    }
    if !json {
        println!("{}", render::panel_text(&panel));
    }
    Ok(())
}

/// Foreground loop shared by both acquisition paths: pump, render, stop on
/// Ctrl-C, on serial-path death, or once `max_updates` payloads applied.
fn drive(ctl: &mut Controller, json: bool, max_updates: Option<u64>) -> Result<()> {
    let shutdown = shutdown_flag()?;
    let mut applied: u64 = 0;
    loop {
        if shutdown.load(Ordering::Relaxed) {
            stop_active(ctl);
            tracing::info!("stopped by user");
            return Ok(());
        }
        for update in ctl.pump() {
            emit(&update, ctl.panel(), json);
            match update {
                Update::Applied(_) => applied += 1,
                Update::SourceFailed(e) => return Err(eyre::Report::new(e)),
                _ => {}
            }
        }
        if let Some(max) = max_updates
            && applied >= max
        {
            stop_active(ctl);
            return Ok(());
        }
        std::thread::sleep(PUMP_INTERVAL);
    }
}

fn emit(update: &Update, panel: &Panel, json: bool) {
    if json {
        println!("{}", render::update_json(update, panel));
        return;
    }
    match update {
        Update::Applied(_) => {
            println!("{}", render::panel_text(panel));
            println!("info: {}", render::update_text(update));
        }
        other => println!("info: {}", render::update_text(other)),
    }
}

fn stop_active(ctl: &mut Controller) {
    let res = match ctl.state() {
        AcquisitionState::SerialActive => ctl.disconnect(),
        AcquisitionState::PollingActive => ctl.stop_polling(),
        AcquisitionState::Idle => Ok(()),
    };
    if let Err(e) = res {
        tracing::warn!(error = %e, "stopping the active path failed");
    }
}

fn shutdown_flag() -> Result<Arc<AtomicBool>> {
    let flag = Arc::new(AtomicBool::new(false));
    let handler_flag = flag.clone();
    ctrlc::set_handler(move || handler_flag.store(true, Ordering::Relaxed))
        .wrap_err("install Ctrl-C handler")?;
    Ok(flag)
}
