//! The four pipeline checks behind one narrow interface.
//!
//! `Checker` exposes external DNS verification, native DNS resolution, port
//! probing and HTTP probing as independent calls. `NetworkChecker` performs
//! them for real; decorators such as `LoggingChecker` wrap any `Checker` and
//! implement the same trait.

pub(crate) mod logging;

use std::collections::{BTreeSet, HashMap};
use std::net::Ipv4Addr;
use std::sync::Arc;

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use crate::config::Config;
use crate::dns::{resolve_native, verify_external};
use crate::error_handling::{InitializationError, ResolveError};
use crate::fetch::probe_http;
use crate::initialization::init_probe_client;
use crate::models::Resolution;
use crate::ports::probe_ports;

pub use logging::LoggingChecker;

/// The checks executed by a resolver.
#[async_trait]
pub trait Checker: Send + Sync {
    /// Confirms `hostname` resolves through at least one external resolver.
    async fn external_dns(
        &self,
        cancel: &CancellationToken,
        hostname: &str,
        external_dns: &[String],
    ) -> Result<(), ResolveError>;

    /// Resolves `hostname` through the local resolver, IPv4 only.
    async fn native_dns(
        &self,
        cancel: &CancellationToken,
        hostname: &str,
    ) -> Result<Vec<Ipv4Addr>, ResolveError>;

    /// Returns the ports that accepted a TCP connection on any of `ips`.
    async fn ports(
        &self,
        cancel: &CancellationToken,
        ips: &[Ipv4Addr],
        ports: &[u16],
    ) -> Result<BTreeSet<u16>, ResolveError>;

    /// Probes HTTP(S) on the open ports and classifies the outcome.
    async fn http(
        &self,
        cancel: &CancellationToken,
        user_agent: &str,
        hostname: &str,
        custom_headers: &HashMap<String, String>,
        open_ports: &BTreeSet<u16>,
    ) -> Result<Resolution, ResolveError>;
}

#[async_trait]
impl<C: Checker + ?Sized> Checker for Arc<C> {
    async fn external_dns(
        &self,
        cancel: &CancellationToken,
        hostname: &str,
        external_dns: &[String],
    ) -> Result<(), ResolveError> {
        (**self).external_dns(cancel, hostname, external_dns).await
    }

    async fn native_dns(
        &self,
        cancel: &CancellationToken,
        hostname: &str,
    ) -> Result<Vec<Ipv4Addr>, ResolveError> {
        (**self).native_dns(cancel, hostname).await
    }

    async fn ports(
        &self,
        cancel: &CancellationToken,
        ips: &[Ipv4Addr],
        ports: &[u16],
    ) -> Result<BTreeSet<u16>, ResolveError> {
        (**self).ports(cancel, ips, ports).await
    }

    async fn http(
        &self,
        cancel: &CancellationToken,
        user_agent: &str,
        hostname: &str,
        custom_headers: &HashMap<String, String>,
        open_ports: &BTreeSet<u16>,
    ) -> Result<Resolution, ResolveError> {
        (**self)
            .http(cancel, user_agent, hostname, custom_headers, open_ports)
            .await
    }
}

/// `Checker` that talks to the network.
#[derive(Debug, Clone)]
pub struct NetworkChecker {
    config: Config,
    client: reqwest::Client,
}

impl NetworkChecker {
    /// Creates a checker with a probe client built from `config`.
    ///
    /// # Errors
    ///
    /// Returns `InitializationError::HttpClientError` if the HTTP client
    /// cannot be built.
    pub fn new(config: Config) -> Result<Self, InitializationError> {
        let client = init_probe_client(&config)?;
        Ok(Self { config, client })
    }

    /// Creates a checker around an existing HTTP client.
    ///
    /// The client should use `scoped_redirect_policy`, otherwise
    /// redirects are not scope-checked.
    pub fn with_client(config: Config, client: reqwest::Client) -> Self {
        Self { config, client }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }
}

#[async_trait]
impl Checker for NetworkChecker {
    async fn external_dns(
        &self,
        cancel: &CancellationToken,
        hostname: &str,
        external_dns: &[String],
    ) -> Result<(), ResolveError> {
        verify_external(cancel, hostname, external_dns, &self.config).await
    }

    async fn native_dns(
        &self,
        cancel: &CancellationToken,
        hostname: &str,
    ) -> Result<Vec<Ipv4Addr>, ResolveError> {
        resolve_native(cancel, hostname).await
    }

    async fn ports(
        &self,
        cancel: &CancellationToken,
        ips: &[Ipv4Addr],
        ports: &[u16],
    ) -> Result<BTreeSet<u16>, ResolveError> {
        probe_ports(cancel, ips, ports, &self.config).await
    }

    async fn http(
        &self,
        cancel: &CancellationToken,
        user_agent: &str,
        hostname: &str,
        custom_headers: &HashMap<String, String>,
        open_ports: &BTreeSet<u16>,
    ) -> Result<Resolution, ResolveError> {
        probe_http(
            &self.client,
            cancel,
            &self.config,
            user_agent,
            hostname,
            custom_headers,
            open_ports,
        )
        .await
    }
}
