//! TCP port discovery.
//!
//! Dials every (ip, port) pair over several passes and reports the ports that
//! accepted a connection on at least one candidate IP.

use std::collections::BTreeSet;
use std::future::Future;
use std::net::{Ipv4Addr, SocketAddr};
use std::time::Duration;

use log::{debug, info};
use tokio::net::TcpStream;
use tokio_util::sync::CancellationToken;

use crate::config::Config;
use crate::error_handling::ResolveError;
use crate::utils::cancellable;

/// Finds the ports that accept TCP connections on any of `ips`.
///
/// Runs up to `config.port_passes` passes. Each pass dials every pair whose
/// port is not yet known to be open, one at a time, with
/// `config.port_connect_timeout`. A successful connection is closed
/// immediately and its port is never dialed again in this probe. Repeated
/// passes recover ports whose first dial was lost to packet loss or rate
/// limiting.
///
/// # Errors
///
/// Returns `ResolveError::Cancelled` if `cancel` fires, otherwise
/// `ResolveError::NoOpenPort` if no dial ever succeeded.
pub async fn probe_ports(
    cancel: &CancellationToken,
    ips: &[Ipv4Addr],
    ports: &[u16],
    config: &Config,
) -> Result<BTreeSet<u16>, ResolveError> {
    let timeout = config.port_connect_timeout;
    scan_passes(cancel, ips, ports, config.port_passes, |addr| {
        dial(addr, timeout)
    })
    .await
}

/// The pass loop of `probe_ports`, over any dialer that reports whether
/// `addr` accepted a connection.
async fn scan_passes<D, F>(
    cancel: &CancellationToken,
    ips: &[Ipv4Addr],
    ports: &[u16],
    passes: usize,
    mut dialer: D,
) -> Result<BTreeSet<u16>, ResolveError>
where
    D: FnMut(SocketAddr) -> F,
    F: Future<Output = bool>,
{
    let mut open_ports = BTreeSet::new();

    for pass in 1..=passes {
        for ip in ips {
            for port in ports {
                if open_ports.contains(port) {
                    continue;
                }
                if cancellable(cancel, dialer(SocketAddr::from((*ip, *port)))).await? {
                    open_ports.insert(*port);
                }
            }
        }
        if ports.iter().all(|port| open_ports.contains(port)) {
            debug!("All {} port(s) open after pass {pass}", ports.len());
            break;
        }
    }

    if open_ports.is_empty() {
        info!("No open port among {ports:?} on {ips:?}");
        return Err(ResolveError::NoOpenPort);
    }
    Ok(open_ports)
}

/// Attempts a single TCP connection; `true` if it was accepted.
async fn dial(addr: SocketAddr, timeout: Duration) -> bool {
    match tokio::time::timeout(timeout, TcpStream::connect(addr)).await {
        Ok(Ok(stream)) => {
            drop(stream);
            debug!("Port open: {addr}");
            true
        }
        Ok(Err(e)) => {
            debug!("Port closed: {addr}: {e}");
            false
        }
        Err(_) => {
            debug!("Port dial timed out: {addr}");
            false
        }
    }
}
