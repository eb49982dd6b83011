//! Native (local resolver) hostname lookup.

use std::net::{IpAddr, Ipv4Addr};

use log::{debug, warn};
use tokio_util::sync::CancellationToken;

use crate::error_handling::ResolveError;
use crate::utils::cancellable;

/// Resolves `hostname` through the system resolver and keeps only IPv4 addresses.
///
/// IPv6 results are dropped silently. An empty result is not an error here;
/// the caller decides what an empty candidate set means.
///
/// # Errors
///
/// Returns `ResolveError::Cancelled` if `cancel` fires, otherwise
/// `ResolveError::NativeDnsResolutionFailure` if the lookup fails.
pub async fn resolve_native(
    cancel: &CancellationToken,
    hostname: &str,
) -> Result<Vec<Ipv4Addr>, ResolveError> {
    let lookup = cancellable(cancel, tokio::net::lookup_host((hostname, 0u16))).await?;
    let addrs = lookup.map_err(|e| {
        warn!("Native DNS lookup failed for {hostname}: {e}");
        ResolveError::NativeDnsResolutionFailure
    })?;

    let mut ips: Vec<Ipv4Addr> = Vec::new();
    for addr in addrs {
        match addr.ip() {
            IpAddr::V4(ip) if !ips.contains(&ip) => ips.push(ip),
            IpAddr::V4(_) => {}
            IpAddr::V6(ip) => debug!("Dropping IPv6 address {ip} for {hostname}"),
        }
    }
    Ok(ips)
}
