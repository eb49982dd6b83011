//! Configuration constants.
//!
//! This module defines the default timeouts, retry bounds and thresholds used
//! throughout the resolution pipeline. `Config::default()` is built from these.

use std::time::Duration;

// DNS verification
/// Per-query timeout for a single external DNS exchange
pub const DNS_TIMEOUT: Duration = Duration::from_secs(6);
/// Maximum total time spent retrying the external resolver list
pub const DNS_RETRY_MAX_ELAPSED: Duration = Duration::from_secs(120);
/// Delay before the second pass over the external resolver list
pub const DNS_RETRY_INITIAL_DELAY_MS: u64 = 500;
/// Base by which the retry delay grows after each failed pass
pub const DNS_RETRY_BASE: u64 = 2;
/// Upper bound for a single delay between passes
pub const DNS_RETRY_MAX_DELAY: Duration = Duration::from_secs(60);
/// Port assumed for an external resolver given without one
pub const DNS_DEFAULT_PORT: u16 = 53;

// Port probing
/// TCP connect timeout for a single (ip, port) dial
pub const PORT_CONNECT_TIMEOUT: Duration = Duration::from_secs(5);
/// Number of passes over all (ip, port) pairs
pub const PORT_PASSES: usize = 3;
/// Ports probed when neither the endpoint nor the request names any
pub const DEFAULT_PORTS: [u16; 2] = [80, 443];

// HTTP probing
/// Overall timeout for one HTTP request, redirects included
pub const HTTP_TIMEOUT: Duration = Duration::from_secs(30);
/// A probe at or above this duration is considered slow
pub const HTTP_SLOW_RESPONSE_THRESHOLD: Duration = Duration::from_secs(4);
/// Maximum number of redirects followed per request
pub const MAX_REDIRECTS: usize = 3;

/// Browser-like User-Agent used for the blocked-by-user-agent check.
///
/// Independent of the caller's user agent: if requests succeed with this value
/// after failing with the caller's, the target is filtering on the header.
pub const FALLBACK_USER_AGENT: &str =
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/51.0.2704.103 Safari/537.36";

/// User-Agent of the primary probe when the CLI is given none.
pub const DEFAULT_USER_AGENT: &str = concat!("endpoint_resolver/", env!("CARGO_PKG_VERSION"));

/// External resolvers used by the CLI when none are given
pub const DEFAULT_EXTERNAL_DNS: [&str; 2] = ["8.8.8.8:53", "1.1.1.1:53"];

pub const SCHEME_HTTP: &str = "http";
pub const SCHEME_HTTPS: &str = "https";
pub const HTTP_DEFAULT_PORT: u16 = 80;
pub const HTTPS_DEFAULT_PORT: u16 = 443;
