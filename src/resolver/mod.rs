//! Resolution orchestrator.
//!
//! Parses the endpoint, classifies its hostname once, then runs the checks in
//! a fixed order: external DNS, native DNS, ports, HTTP. Each stage either
//! feeds the next or ends the resolution with its error.

mod logging;

use async_trait::async_trait;
use log::debug;
use tokio_util::sync::CancellationToken;

use crate::checker::{Checker, LoggingChecker, NetworkChecker};
use crate::config::Config;
use crate::endpoint::{Endpoint, HostKind};
use crate::error_handling::{InitializationError, ResolveError};
use crate::models::{ResolveRequest, Resolution};

pub use logging::LoggingResolver;

/// Resolves an endpoint into live, in-scope URLs.
#[async_trait]
pub trait Resolver: Send + Sync {
    async fn resolve(
        &self,
        cancel: &CancellationToken,
        request: &ResolveRequest,
    ) -> Result<Resolution, ResolveError>;
}

/// Orchestrates the checks of a `Checker` into a single resolution.
///
/// Holds no per-call state; concurrent `resolve` calls are independent.
#[derive(Debug, Clone)]
pub struct EndpointResolver<C> {
    external_dns: Vec<String>,
    config: Config,
    checker: C,
}

impl EndpointResolver<NetworkChecker> {
    /// Creates a resolver backed by a `NetworkChecker`.
    ///
    /// `external_dns` lists the resolvers used to verify domain names, as
    /// `host:port` (a bare IP implies port 53). They are tried in order.
    ///
    /// # Errors
    ///
    /// Returns `InitializationError` if the HTTP client cannot be built.
    pub fn new(external_dns: Vec<String>, config: Config) -> Result<Self, InitializationError> {
        let checker = NetworkChecker::new(config.clone())?;
        Ok(Self::with_checker(external_dns, config, checker))
    }
}

impl<C: Checker> EndpointResolver<C> {
    pub fn with_checker(external_dns: Vec<String>, config: Config, checker: C) -> Self {
        Self {
            external_dns,
            config,
            checker,
        }
    }

    pub fn checker(&self) -> &C {
        &self.checker
    }
}

#[async_trait]
impl<C: Checker> Resolver for EndpointResolver<C> {
    async fn resolve(
        &self,
        cancel: &CancellationToken,
        request: &ResolveRequest,
    ) -> Result<Resolution, ResolveError> {
        let endpoint = Endpoint::parse(&request.endpoint)?;
        let ports = endpoint.effective_ports(&request.ports, &self.config.default_ports);
        let hostname = endpoint.hostname.as_str();

        let ips = match endpoint.kind() {
            HostKind::Invalid => return Err(ResolveError::InvalidEndpoint),
            HostKind::Ipv6(_) => return Err(ResolveError::Ipv6Unsupported),
            HostKind::Ipv4(ip) => vec![ip],
            HostKind::Domain => {
                self.checker
                    .external_dns(cancel, hostname, &self.external_dns)
                    .await?;
                let ips = self.checker.native_dns(cancel, hostname).await?;
                if ips.is_empty() {
                    return Err(ResolveError::NoIpForEndpoint);
                }
                ips
            }
        };
        debug!("Probing {hostname}: ips={ips:?} ports={ports:?}");

        let open_ports = self.checker.ports(cancel, &ips, &ports).await?;
        self.checker
            .http(
                cancel,
                &request.user_agent,
                hostname,
                &request.custom_headers,
                &open_ports,
            )
            .await
    }
}

/// Production wiring: a `NetworkChecker` and the resolver both wrapped in
/// logging decorators.
///
/// # Errors
///
/// Returns `InitializationError` if the HTTP client cannot be built.
pub fn new_resolver_with_logging(
    external_dns: Vec<String>,
    config: Config,
) -> Result<LoggingResolver<EndpointResolver<LoggingChecker<NetworkChecker>>>, InitializationError>
{
    let checker = LoggingChecker::new(NetworkChecker::new(config.clone())?, "checker");
    let resolver = EndpointResolver::with_checker(external_dns, config, checker);
    Ok(LoggingResolver::new(resolver, "resolver"))
}
