//! Error categorization and retry strategy.
//!
//! This module configures the external DNS retry strategy and labels the
//! transport errors that probes skip over, so debug logs say why an attempt
//! was discarded.

use std::time::{Duration, Instant};

use hickory_resolver::error::{ResolveError as DnsError, ResolveErrorKind};
use tokio_retry::strategy::ExponentialBackoff;

use crate::config::Config;

/// Creates the exponential backoff used between passes over the external resolver list.
///
/// Delays start at `dns_initial_backoff`, are multiplied by `dns_backoff_base`
/// after each pass and are capped at `dns_max_backoff`. The iterator ends as
/// soon as sleeping for the next delay would push the total time since
/// `started` past `dns_max_elapsed`.
///
/// # Returns
///
/// A retry strategy iterator ready for use with `tokio_retry::RetryIf`.
pub fn get_dns_retry_strategy(
    config: &Config,
    started: Instant,
) -> impl Iterator<Item = Duration> {
    let base = config.dns_backoff_base.max(2);
    let initial_ms = config.dns_initial_backoff.as_millis() as u64;
    let max_elapsed = config.dns_max_elapsed;

    // ExponentialBackoff yields factor * base^n, starting at n = 1
    ExponentialBackoff::from_millis(base)
        .factor((initial_ms / base).max(1))
        .max_delay(config.dns_max_backoff)
        .take_while(move |delay| started.elapsed() + *delay <= max_elapsed)
}

/// Labels a `reqwest::Error` for logging.
pub fn categorize_reqwest_error(error: &reqwest::Error) -> &'static str {
    if error.is_builder() {
        "request builder error"
    } else if error.is_timeout() {
        "timeout"
    } else if error.is_connect() {
        "connect error"
    } else if error.is_redirect() {
        "redirect error"
    } else if error.is_request() {
        "request error"
    } else if error.is_body() {
        "body error"
    } else if error.is_decode() {
        "decode error"
    } else {
        "other error"
    }
}

/// Labels a `hickory_resolver` error for logging.
pub fn categorize_dns_error(error: &DnsError) -> String {
    match error.kind() {
        ResolveErrorKind::NoRecordsFound { response_code, .. } => {
            format!("no records ({response_code})")
        }
        ResolveErrorKind::Timeout => "timeout".to_string(),
        ResolveErrorKind::Io(_) => "io error".to_string(),
        ResolveErrorKind::Proto(_) => "protocol error".to_string(),
        _ => "other error".to_string(),
    }
}
