//! HTTP client initialization.
//!
//! This module builds the client used by the HTTP prober.

use reqwest::ClientBuilder;

use crate::config::Config;
use crate::error_handling::InitializationError;
use crate::fetch::scoped_redirect_policy;

/// Initializes the HTTP client used for probing candidate URLs.
///
/// Creates a `reqwest::Client` configured with:
/// - Overall timeout from `config.http_timeout` (redirects included)
/// - Certificate verification disabled, since targets often present
///   self-signed or internal certificates
/// - A redirect policy that stops at the first out-of-scope hop or after
///   `config.max_redirects` hops
/// - No proxy and no idle connection reuse, so every probe dials the target
///   directly
///
/// No default User-Agent is set; each request carries its own.
///
/// # Errors
///
/// Returns `InitializationError::HttpClientError` if client creation fails.
pub fn init_probe_client(config: &Config) -> Result<reqwest::Client, InitializationError> {
    let client = ClientBuilder::new()
        .use_rustls_tls()
        .danger_accept_invalid_certs(true)
        .redirect(scoped_redirect_policy(config.max_redirects))
        .timeout(config.http_timeout)
        .pool_max_idle_per_host(0)
        .no_proxy()
        .build()?;
    Ok(client)
}
