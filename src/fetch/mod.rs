//! HTTP reachability and scope probing.
//!
//! Given the open ports of a host, this module requests every candidate URL,
//! follows redirects inside the host's scope, and classifies the outcome:
//! - Reached URLs, optionally with an out-of-scope or slow-response warning
//! - Blocked by user agent, when only the fallback user agent gets through
//! - No HTTP connection at all

mod redirects;
mod request;
mod scope;

use std::collections::{BTreeSet, HashMap};
use std::time::Instant;

use log::{info, warn};
use reqwest::Url;
use tokio_util::sync::CancellationToken;

use crate::config::Config;
use crate::error_handling::{ResolveError, Warning};
use crate::models::{ProbedUrls, Resolution};

pub use redirects::scoped_redirect_policy;
use request::{build_headers, send_request};
use scope::{any_within_scope, any_within_time_limit, candidate_urls};

/// Probes every candidate URL of every open port and classifies the result.
///
/// Candidates are requested one at a time with `user_agent` and
/// `custom_headers`. If at least one request reached a URL, the reached URLs
/// are returned with:
/// - `Warning::RedirectedOutOfScope` if none stays on `hostname` and an open port
/// - otherwise `Warning::HttpTimeout` if none finished below
///   `config.slow_response_threshold`
///
/// If nothing was reached, every candidate is retried with
/// `config.fallback_user_agent` to tell user-agent blocking apart from an
/// unreachable service.
///
/// # Errors
///
/// - `ResolveError::BlockedByUserAgent` if only the fallback user agent got a response
/// - `ResolveError::NoHttpConnection` if neither did
/// - `ResolveError::Cancelled` if `cancel` fires
pub async fn probe_http(
    client: &reqwest::Client,
    cancel: &CancellationToken,
    config: &Config,
    user_agent: &str,
    hostname: &str,
    custom_headers: &HashMap<String, String>,
    open_ports: &BTreeSet<u16>,
) -> Result<Resolution, ResolveError> {
    let candidates = candidates_for(hostname, open_ports);
    let headers = build_headers(user_agent, custom_headers);

    let mut probed = ProbedUrls::new();
    for candidate in &candidates {
        let start = Instant::now();
        if let Some(reached) = send_request(client, cancel, candidate, headers.clone()).await? {
            probed.record(reached, start.elapsed());
        }
    }

    if !probed.is_empty() {
        let warning = if !any_within_scope(&probed, hostname, open_ports) {
            Some(Warning::RedirectedOutOfScope)
        } else if !any_within_time_limit(&probed, config.slow_response_threshold) {
            Some(Warning::HttpTimeout)
        } else {
            None
        };
        if let Some(warning) = warning {
            warn!("{hostname}: {warning}");
        }
        info!("{hostname}: reached {} URL(s)", probed.len());
        return Ok(Resolution {
            urls: probed.to_strings(),
            warning,
        });
    }

    let fallback_headers = build_headers(&config.fallback_user_agent, custom_headers);
    for candidate in &candidates {
        if send_request(client, cancel, candidate, fallback_headers.clone())
            .await?
            .is_some()
        {
            warn!("{hostname}: only reachable with the fallback user agent");
            return Err(ResolveError::BlockedByUserAgent);
        }
    }

    info!("{hostname}: no HTTP connection on ports {open_ports:?}");
    Err(ResolveError::NoHttpConnection)
}

fn candidates_for(hostname: &str, open_ports: &BTreeSet<u16>) -> Vec<Url> {
    open_ports
        .iter()
        .flat_map(|port| candidate_urls(hostname, *port))
        .filter_map(|raw| match Url::parse(&raw) {
            Ok(url) => Some(url),
            Err(e) => {
                warn!("Skipping unparseable candidate URL {raw}: {e}");
                None
            }
        })
        .collect()
}

#[cfg(test)]
mod tests;
