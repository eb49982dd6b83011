//! Endpoint parsing and classification.
//!
//! An endpoint is `hostname` or `hostname:port`. This module splits it,
//! works out which ports to probe, and classifies the hostname once so the
//! orchestrator can branch on a single value.

use std::net::{Ipv4Addr, Ipv6Addr};

use crate::domain::is_domain_name;
use crate::error_handling::ResolveError;

/// An endpoint split into hostname and optional embedded port.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    pub hostname: String,
    pub port: Option<u16>,
}

/// Shape of an endpoint's hostname.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostKind {
    Domain,
    Ipv4(Ipv4Addr),
    Ipv6(Ipv6Addr),
    Invalid,
}

impl Endpoint {
    /// Splits an endpoint on its first `:`.
    ///
    /// IPv6 literals are recognized before splitting, bare (`::1`) or
    /// bracketed (`[::1]`, `[::1]:8443`), so they classify as IPv6 instead of
    /// being cut apart. Brackets are only valid around an IPv6 literal. An
    /// empty port (`example.com:`) means no embedded port.
    ///
    /// # Errors
    ///
    /// - `ResolveError::InvalidEndpointPort` if an embedded port is not a
    ///   number in `1..=65535`
    /// - `ResolveError::InvalidEndpoint` for brackets around anything but an
    ///   IPv6 literal
    pub fn parse(raw: &str) -> Result<Self, ResolveError> {
        if raw.parse::<Ipv6Addr>().is_ok() {
            return Ok(Endpoint {
                hostname: raw.to_string(),
                port: None,
            });
        }

        if let Some(rest) = raw.strip_prefix('[') {
            if let Some((host, tail)) = rest.split_once(']') {
                if host.parse::<Ipv6Addr>().is_err() {
                    return Err(ResolveError::InvalidEndpoint);
                }
                let port = match tail.strip_prefix(':') {
                    Some(port) => parse_port(port)?,
                    None if tail.is_empty() => None,
                    None => return Err(ResolveError::InvalidEndpoint),
                };
                return Ok(Endpoint {
                    hostname: host.to_string(),
                    port,
                });
            }
        }

        match raw.split_once(':') {
            Some((host, port)) => Ok(Endpoint {
                hostname: host.to_string(),
                port: parse_port(port)?,
            }),
            None => Ok(Endpoint {
                hostname: raw.to_string(),
                port: None,
            }),
        }
    }

    /// Ports to probe: embedded port, else explicit ports, else the defaults.
    ///
    /// The result keeps first-seen order and holds no duplicates.
    pub fn effective_ports(&self, requested: &[u16], defaults: &[u16]) -> Vec<u16> {
        if let Some(port) = self.port {
            return vec![port];
        }
        let source = if requested.is_empty() {
            defaults
        } else {
            requested
        };
        let mut ports = Vec::with_capacity(source.len());
        for port in source {
            if !ports.contains(port) {
                ports.push(*port);
            }
        }
        ports
    }

    /// Classifies the hostname.
    ///
    /// IP literals are checked first, so a hostname that is both an IP literal
    /// and domain-shaped is handled as an IP.
    pub fn kind(&self) -> HostKind {
        classify_host(&self.hostname)
    }
}

/// Classifies a hostname as IPv4 literal, IPv6 literal, domain name or invalid.
pub fn classify_host(hostname: &str) -> HostKind {
    if let Ok(ip) = hostname.parse::<Ipv4Addr>() {
        return HostKind::Ipv4(ip);
    }
    if let Ok(ip) = hostname.parse::<Ipv6Addr>() {
        return HostKind::Ipv6(ip);
    }
    if is_domain_name(hostname) {
        return HostKind::Domain;
    }
    HostKind::Invalid
}

/// An empty port is the same as no port.
fn parse_port(raw: &str) -> Result<Option<u16>, ResolveError> {
    if raw.is_empty() {
        return Ok(None);
    }
    match raw.parse::<u16>() {
        Ok(0) | Err(_) => Err(ResolveError::InvalidEndpointPort),
        Ok(port) => Ok(Some(port)),
    }
}

#[cfg(test)]
mod tests {
    include!("tests.rs");
}
