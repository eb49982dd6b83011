//! External DNS verification.
//!
//! Queries each caller-supplied resolver in order for an A record, retrying
//! the whole list with exponential backoff until one answers or the retry
//! window closes.

use std::time::Instant;

use hickory_resolver::proto::rr::RecordType;
use hickory_resolver::TokioAsyncResolver;
use log::{debug, warn};
use tokio_retry::RetryIf;
use tokio_util::sync::CancellationToken;

use crate::config::Config;
use crate::error_handling::{categorize_dns_error, get_dns_retry_strategy, ResolveError};
use crate::initialization::{init_external_resolver, parse_resolver_address};
use crate::utils::cancellable;

/// Confirms that `hostname` has an A record according to at least one external resolver.
///
/// On each pass the resolvers are tried in order. A resolver that errors,
/// answers with no records, or answers `REFUSED`/`SERVFAIL` is skipped in
/// favor of the next; the first usable answer ends the check. Failed passes
/// are retried with the backoff from `get_dns_retry_strategy()` until
/// `config.dns_max_elapsed` is spent.
///
/// # Arguments
///
/// * `cancel` - Aborts the check, including any backoff sleep
/// * `hostname` - The hostname to verify
/// * `external_dns` - Resolver addresses as `ip:port` (a bare IP gets port 53)
/// * `config` - Timeouts and retry bounds
///
/// # Errors
///
/// Returns `ResolveError::Cancelled` if `cancel` fires, otherwise
/// `ResolveError::ThirdPartyDnsResolutionFailure` if no resolver answered.
pub async fn verify_external(
    cancel: &CancellationToken,
    hostname: &str,
    external_dns: &[String],
    config: &Config,
) -> Result<(), ResolveError> {
    let resolvers: Vec<(String, TokioAsyncResolver)> = external_dns
        .iter()
        .filter_map(|raw| match parse_resolver_address(raw) {
            Some(addr) => Some((raw.clone(), init_external_resolver(addr, config.dns_timeout))),
            None => {
                warn!("Skipping unusable external DNS resolver address '{raw}'");
                None
            }
        })
        .collect();

    if resolvers.is_empty() {
        warn!("No usable external DNS resolver to verify {hostname}");
        return Err(ResolveError::ThirdPartyDnsResolutionFailure);
    }

    let fqdn = to_fqdn(hostname);
    let fqdn = fqdn.as_str();
    let resolvers = resolvers.as_slice();
    let strategy = get_dns_retry_strategy(config, Instant::now());

    let outcome = RetryIf::start(
        strategy,
        move || query_resolvers(cancel, fqdn, resolvers),
        |error: &ResolveError| !error.is_cancelled(),
    );

    match cancellable(cancel, outcome).await? {
        Ok(()) => Ok(()),
        Err(ResolveError::Cancelled) => Err(ResolveError::Cancelled),
        Err(_) => {
            warn!(
                "External DNS verification failed for {hostname} after {} resolver(s)",
                resolvers.len()
            );
            Err(ResolveError::ThirdPartyDnsResolutionFailure)
        }
    }
}

/// One pass over the resolver list.
async fn query_resolvers(
    cancel: &CancellationToken,
    fqdn: &str,
    resolvers: &[(String, TokioAsyncResolver)],
) -> Result<(), ResolveError> {
    for (address, resolver) in resolvers {
        match cancellable(cancel, resolver.lookup(fqdn, RecordType::A)).await? {
            Ok(lookup) if !lookup.records().is_empty() => {
                debug!("Resolver {address} answered for {fqdn}");
                return Ok(());
            }
            Ok(_) => debug!("Resolver {address} returned no answer for {fqdn}"),
            Err(e) => debug!(
                "Resolver {address} failed for {fqdn}: {}",
                categorize_dns_error(&e)
            ),
        }
    }
    Err(ResolveError::ThirdPartyDnsResolutionFailure)
}

fn to_fqdn(hostname: &str) -> String {
    if hostname.ends_with('.') {
        hostname.to_string()
    } else {
        format!("{hostname}.")
    }
}
