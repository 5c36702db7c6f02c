mod cli;
mod error_fmt;
mod render;
mod watch;

use clap::Parser;
use cli::{Cli, Commands, DEFAULT_CONFIG_PATH, FILE_GUARD, JSON_MODE};
use eyre::WrapErr;
use helio_config::Config;
use std::path::Path;
use tracing_subscriber::EnvFilter;

fn main() {
    let code = match run() {
        Ok(()) => 0,
        Err(err) => {
            if JSON_MODE.get().copied().unwrap_or(false) {
                eprintln!("{}", error_fmt::format_error_json(&err));
            } else {
                eprintln!("{}", error_fmt::humanize(&err));
            }
            error_fmt::exit_code_for_error(&err)
        }
    };
    std::process::exit(code);
}

fn run() -> eyre::Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();
    let _ = JSON_MODE.set(cli.json);

    let cfg = load_config(cli.config.as_deref())?;
    init_tracing(cli.json, &cli.log_level, &cfg.logging)?;
    cfg.validate()?;

    match cli.cmd {
        Commands::Ports => cmd_ports(cli.json),
        Commands::Watch {
            port,
            baud,
            sim,
            max_updates,
        } => watch::run_watch(&cfg, cli.json, port, baud, sim, max_updates),
        Commands::Poll { mac, max_updates } => watch::run_poll(&cfg, cli.json, mac, max_updates),
        Commands::Replay { file } => watch::run_replay(&file, cli.json),
        Commands::SelfCheck => cmd_self_check(&cfg),
    }
}

/// An explicit `--config` must exist; the default path is optional and
/// falls back to built-in defaults so the tool works out of the box.
fn load_config(path: Option<&Path>) -> eyre::Result<Config> {
    let (path, required) = match path {
        Some(p) => (p, true),
        None => (Path::new(DEFAULT_CONFIG_PATH), false),
    };
    if !path.exists() {
        if required {
            eyre::bail!("config file {path:?} does not exist");
        }
        return Ok(Config::default());
    }
    let text = std::fs::read_to_string(path).wrap_err_with(|| format!("read config {path:?}"))?;
    helio_config::load_toml(&text).wrap_err_with(|| format!("parse config {path:?}"))
}

fn init_tracing(json: bool, cli_level: &str, logging: &helio_config::Logging) -> eyre::Result<()> {
    let level = logging.level.clone().unwrap_or_else(|| cli_level.to_string());
    let filter = EnvFilter::try_new(&level).wrap_err_with(|| format!("invalid log level {level:?}"))?;

    if let Some(file) = &logging.file {
        let path = Path::new(file);
        let dir = match path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        };
        let name = path
            .file_name()
            .map_or_else(|| "helio.log".to_string(), |n| n.to_string_lossy().into_owned());
        let appender = match logging.rotation.as_deref() {
            Some("daily") => tracing_appender::rolling::daily(dir, name),
            Some("hourly") => tracing_appender::rolling::hourly(dir, name),
            _ => tracing_appender::rolling::never(dir, name),
        };
        let (writer, guard) = tracing_appender::non_blocking(appender);
        let _ = FILE_GUARD.set(guard);
        if json {
            tracing_subscriber::fmt()
                .json()
                .with_env_filter(filter)
                .with_writer(writer)
                .init();
        } else {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(writer)
                .init();
        }
    } else if json {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    }
    Ok(())
}

fn cmd_ports(json: bool) -> eyre::Result<()> {
    let ports = helio_link::available_ports()?;
    if json {
        println!("{}", serde_json::json!({ "ports": ports }));
    } else if ports.is_empty() {
        println!("no serial ports found");
    } else {
        for p in &ports {
            println!("{p}");
        }
    }
    Ok(())
}

fn cmd_self_check(cfg: &Config) -> eyre::Result<()> {
    let ports = helio_link::available_ports()?;
    let _ = helio_link::HttpClient::new()?;
    println!(
        "config ok; {} serial port(s) visible; http client ok; polling target {}",
        ports.len(),
        cfg.network.mac
    );
    println!("self-check ok");
    Ok(())
}
