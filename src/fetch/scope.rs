//! Candidate URL construction and scope checks over probe outcomes.

use std::collections::BTreeSet;
use std::time::Duration;

use url::Url;

use crate::config::{HTTPS_DEFAULT_PORT, HTTP_DEFAULT_PORT, SCHEME_HTTP, SCHEME_HTTPS};
use crate::domain::in_scope;
use crate::models::ProbedUrls;

/// Builds the URLs to probe for one open port.
///
/// Port 80 only gets `http://host/` and port 443 only `https://host/`; any
/// other port gets both schemes with the port spelled out.
pub fn candidate_urls(hostname: &str, port: u16) -> Vec<String> {
    match port {
        HTTP_DEFAULT_PORT => vec![format!("{SCHEME_HTTP}://{hostname}/")],
        HTTPS_DEFAULT_PORT => vec![format!("{SCHEME_HTTPS}://{hostname}/")],
        _ => vec![
            format!("{SCHEME_HTTP}://{hostname}:{port}/"),
            format!("{SCHEME_HTTPS}://{hostname}:{port}/"),
        ],
    }
}

/// Returns `true` if the URL's port, or its scheme's default port, is in `open_ports`.
pub fn port_in_scope(url: &Url, open_ports: &BTreeSet<u16>) -> bool {
    url.port_or_known_default()
        .is_some_and(|port| open_ports.contains(&port))
}

/// Returns `true` if any reached URL stays on `hostname` and one of `open_ports`.
pub fn any_within_scope(probed: &ProbedUrls, hostname: &str, open_ports: &BTreeSet<u16>) -> bool {
    probed.urls().any(|url| {
        url.host_str().is_some_and(|host| in_scope(hostname, host)) && port_in_scope(url, open_ports)
    })
}

/// Returns `true` if any probe finished below `threshold`.
pub fn any_within_time_limit(probed: &ProbedUrls, threshold: Duration) -> bool {
    probed.durations().any(|elapsed| elapsed < threshold)
}
