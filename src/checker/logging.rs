//! Logging decorator for `Checker`.

use std::collections::{BTreeSet, HashMap};
use std::fmt::Debug;
use std::net::Ipv4Addr;
use std::time::Instant;

use async_trait::async_trait;
use log::{debug, info, warn};
use tokio_util::sync::CancellationToken;

use crate::checker::Checker;
use crate::error_handling::ResolveError;
use crate::models::Resolution;
use crate::utils::duration_to_ms;

/// Wraps a `Checker` and logs every call: inputs, elapsed time and result.
///
/// Logging happens around the inner call only; results pass through
/// untouched. `instance` prefixes every line so several decorated checkers
/// can be told apart.
#[derive(Debug, Clone)]
pub struct LoggingChecker<C> {
    inner: C,
    instance: String,
}

impl<C: Checker> LoggingChecker<C> {
    pub fn new(inner: C, instance: impl Into<String>) -> Self {
        Self {
            inner,
            instance: instance.into(),
        }
    }

    pub fn inner(&self) -> &C {
        &self.inner
    }
}

/// Logs the end of one checker call.
pub(crate) fn log_outcome<T: Debug>(
    instance: &str,
    operation: &str,
    started: Instant,
    outcome: &Result<T, ResolveError>,
) {
    let elapsed_ms = duration_to_ms(started.elapsed());
    match outcome {
        Ok(value) => info!("[{instance}] {operation} ok in {elapsed_ms:.1}ms: {value:?}"),
        Err(ResolveError::Cancelled) => {
            info!("[{instance}] {operation} cancelled after {elapsed_ms:.1}ms")
        }
        Err(e) => warn!(
            "[{instance}] {operation} failed in {elapsed_ms:.1}ms: {e} ({})",
            e.code()
        ),
    }
}

#[async_trait]
impl<C: Checker> Checker for LoggingChecker<C> {
    async fn external_dns(
        &self,
        cancel: &CancellationToken,
        hostname: &str,
        external_dns: &[String],
    ) -> Result<(), ResolveError> {
        debug!(
            "[{}] external_dns hostname={hostname} resolvers={external_dns:?}",
            self.instance
        );
        let started = Instant::now();
        let outcome = self.inner.external_dns(cancel, hostname, external_dns).await;
        log_outcome(&self.instance, "external_dns", started, &outcome);
        outcome
    }

    async fn native_dns(
        &self,
        cancel: &CancellationToken,
        hostname: &str,
    ) -> Result<Vec<Ipv4Addr>, ResolveError> {
        debug!("[{}] native_dns hostname={hostname}", self.instance);
        let started = Instant::now();
        let outcome = self.inner.native_dns(cancel, hostname).await;
        log_outcome(&self.instance, "native_dns", started, &outcome);
        outcome
    }

    async fn ports(
        &self,
        cancel: &CancellationToken,
        ips: &[Ipv4Addr],
        ports: &[u16],
    ) -> Result<BTreeSet<u16>, ResolveError> {
        debug!("[{}] ports ips={ips:?} ports={ports:?}", self.instance);
        let started = Instant::now();
        let outcome = self.inner.ports(cancel, ips, ports).await;
        log_outcome(&self.instance, "ports", started, &outcome);
        outcome
    }

    async fn http(
        &self,
        cancel: &CancellationToken,
        user_agent: &str,
        hostname: &str,
        custom_headers: &HashMap<String, String>,
        open_ports: &BTreeSet<u16>,
    ) -> Result<Resolution, ResolveError> {
        // Header values may carry credentials; only their names are logged
        let header_names: Vec<&String> = custom_headers.keys().collect();
        debug!(
            "[{}] http hostname={hostname} user_agent={user_agent:?} headers={header_names:?} open_ports={open_ports:?}",
            self.instance
        );
        let started = Instant::now();
        let outcome = self
            .inner
            .http(cancel, user_agent, hostname, custom_headers, open_ports)
            .await;
        log_outcome(&self.instance, "http", started, &outcome);
        outcome
    }
}
