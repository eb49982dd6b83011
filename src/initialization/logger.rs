//! Logger initialization.
//!
//! `env_logger` with two output formats: colored plain lines for terminals
//! and one JSON object per line for log collectors.

use std::io::Write;

use colored::Colorize;
use env_logger::fmt::Formatter;
use log::{Level, LevelFilter, Record};
use serde_json::json;

use crate::config::LogFormat;
use crate::error_handling::InitializationError;

/// Dependencies that log per-connection detail at `info` and below.
const NOISY_MODULES: [(&str, LevelFilter); 6] = [
    ("reqwest", LevelFilter::Info),
    ("hyper", LevelFilter::Info),
    ("hyper_util", LevelFilter::Info),
    ("rustls", LevelFilter::Warn),
    // Malformed or refused UDP answers are routine during external DNS checks
    ("hickory_proto", LevelFilter::Error),
    ("hickory_resolver", LevelFilter::Warn),
];

/// Installs the global logger.
///
/// `RUST_LOG` is honored for per-module filters, but `level` always applies
/// to this crate and as the global default.
///
/// ```bash
/// RUST_LOG=hickory_resolver=debug endpoint_resolver example.com --log-level debug
/// ```
///
/// # Errors
///
/// Returns `InitializationError::LoggerError` if a logger is already installed.
pub fn init_logger_with(level: LevelFilter, format: LogFormat) -> Result<(), InitializationError> {
    let mut builder = env_logger::Builder::from_default_env();
    builder.filter_level(level);
    for (module, filter) in NOISY_MODULES {
        builder.filter_module(module, filter);
    }
    builder.filter_module("endpoint_resolver", level);

    match format {
        LogFormat::Json => builder.format(write_json),
        LogFormat::Plain => {
            colored::control::set_override(true);
            builder.format(write_plain)
        }
    };

    builder.try_init()?;
    Ok(())
}

fn write_json(buf: &mut Formatter, record: &Record) -> std::io::Result<()> {
    writeln!(
        buf,
        "{}",
        json_line(
            record.level(),
            record.target(),
            &record.args().to_string(),
            chrono::Utc::now()
        )
    )
}

fn write_plain(buf: &mut Formatter, record: &Record) -> std::io::Result<()> {
    let level = match record.level() {
        Level::Error => "ERROR".red().bold(),
        Level::Warn => "WARN ".yellow(),
        Level::Info => "INFO ".green(),
        Level::Debug => "DEBUG".blue(),
        Level::Trace => "TRACE".purple(),
    };
    writeln!(
        buf,
        "{} {level} {} {}",
        chrono::Local::now().format("%H:%M:%S%.3f"),
        record.target().dimmed(),
        record.args()
    )
}

/// Renders one JSON log line.
fn json_line(
    level: Level,
    target: &str,
    message: &str,
    at: chrono::DateTime<chrono::Utc>,
) -> String {
    json!({
        "ts": at.to_rfc3339_opts(chrono::SecondsFormat::Millis, true),
        "level": level.as_str(),
        "target": target,
        "msg": message,
    })
    .to_string()
}
