//! Main application entry point (CLI binary).
//!
//! This is a thin wrapper around the `endpoint_resolver` library that handles:
//! - Command-line argument parsing
//! - Logger initialization
//! - Deadline and Ctrl-C cancellation
//! - User-facing output formatting
//!
//! All core functionality is implemented in the library crate.

use std::process;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use log::warn;

use endpoint_resolver::initialization::init_logger_with;
use endpoint_resolver::{new_resolver_with_logging, CancellationToken, Config, Opt, Resolver};

#[tokio::main]
async fn main() -> Result<()> {
    let opt = Opt::parse();

    init_logger_with(opt.log_level.into(), opt.log_format)
        .context("Failed to initialize logger")?;

    let resolver = new_resolver_with_logging(opt.external_dns.clone(), Config::default())
        .context("Failed to initialize resolver")?;

    let cancel = CancellationToken::new();
    if let Some(secs) = opt.deadline {
        let deadline = cancel.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_secs(secs)).await;
            warn!("Deadline of {secs}s reached, cancelling");
            deadline.cancel();
        });
    }
    let interrupt = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            interrupt.cancel();
        }
    });

    match resolver.resolve(&cancel, &opt.to_request()).await {
        Ok(resolution) => {
            for url in &resolution.urls {
                println!("{url}");
            }
            if let Some(warning) = resolution.warning {
                eprintln!("{warning}");
            }
            Ok(())
        }
        Err(e) => {
            eprintln!("endpoint_resolver error: {e} ({})", e.code());
            process::exit(1);
        }
    }
}
