//! DNS resolver initialization.
//!
//! This module builds single-nameserver resolvers for the external DNS check.

use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

use hickory_resolver::config::{NameServerConfig, Protocol, ResolverConfig, ResolverOpts};
use hickory_resolver::TokioAsyncResolver;

use crate::config::DNS_DEFAULT_PORT;

/// Parses an external resolver address.
///
/// Accepts `ip:port` or a bare IP, which gets port 53. Returns `None` for
/// anything else.
pub fn parse_resolver_address(raw: &str) -> Option<SocketAddr> {
    let raw = raw.trim();
    if let Ok(addr) = raw.parse::<SocketAddr>() {
        return Some(addr);
    }
    raw.parse::<IpAddr>()
        .ok()
        .map(|ip| SocketAddr::new(ip, DNS_DEFAULT_PORT))
}

/// Initializes a resolver that queries exactly one nameserver over UDP.
///
/// The resolver makes a single attempt per query with the given timeout,
/// keeps no cache and ignores the hosts file and search domains, so every
/// answer comes from `address` itself.
pub fn init_external_resolver(address: SocketAddr, timeout: Duration) -> TokioAsyncResolver {
    let mut config = ResolverConfig::new();
    config.add_name_server(NameServerConfig::new(address, Protocol::Udp));

    let mut opts = ResolverOpts::default();
    opts.timeout = timeout;
    opts.attempts = 1;
    opts.ndots = 0;
    opts.cache_size = 0;
    opts.use_hosts_file = false;
    opts.recursion_desired = true;

    TokioAsyncResolver::tokio(config, opts)
}
