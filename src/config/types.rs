//! Resolver tuning and CLI options.
//!
//! This module defines the tuning `Config` shared by all pipeline components,
//! plus the enums and structs used for command-line argument parsing.

use std::collections::HashMap;
use std::time::Duration;

use clap::{Parser, ValueEnum};
use log::LevelFilter;

use crate::config::constants::{
    DEFAULT_EXTERNAL_DNS, DEFAULT_PORTS, DEFAULT_USER_AGENT, DNS_RETRY_BASE,
    DNS_RETRY_INITIAL_DELAY_MS, DNS_RETRY_MAX_DELAY, DNS_RETRY_MAX_ELAPSED, DNS_TIMEOUT,
    FALLBACK_USER_AGENT, HTTP_SLOW_RESPONSE_THRESHOLD, HTTP_TIMEOUT, MAX_REDIRECTS,
    PORT_CONNECT_TIMEOUT, PORT_PASSES,
};
use crate::models::ResolveRequest;

/// Verbosity of the `--log-level` option.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    /// Per-attempt detail: each resolver, dial and request
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

/// Log line format: colored text for terminals or JSON lines for collectors.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    Plain,
    Json,
}

/// Resolver tuning (no CLI dependencies).
///
/// Every timeout, retry bound and threshold used by the pipeline lives here.
/// Components receive a copy at construction time, so tests can shrink the
/// timeouts without touching process-wide state.
///
/// # Examples
///
/// ```
/// use endpoint_resolver::Config;
/// use std::time::Duration;
///
/// let config = Config {
///     port_connect_timeout: Duration::from_millis(500),
///     port_passes: 1,
///     ..Default::default()
/// };
/// assert_eq!(config.max_redirects, 3);
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// Timeout for a single external DNS exchange
    pub dns_timeout: Duration,

    /// Total time budget for retrying the external resolver list
    pub dns_max_elapsed: Duration,

    /// Delay before the first retry of the resolver list
    pub dns_initial_backoff: Duration,

    /// Base by which consecutive retry delays grow
    pub dns_backoff_base: u64,

    /// Upper bound for a single retry delay
    pub dns_max_backoff: Duration,

    /// TCP connect timeout per (ip, port) dial
    pub port_connect_timeout: Duration,

    /// Number of passes over all (ip, port) pairs
    pub port_passes: usize,

    /// Overall timeout per HTTP request, redirects included
    pub http_timeout: Duration,

    /// Responses at or above this duration count as slow
    pub slow_response_threshold: Duration,

    /// Maximum number of redirects followed per request
    pub max_redirects: usize,

    /// Ports probed when neither the endpoint nor the request names any
    pub default_ports: Vec<u16>,

    /// User agent for the blocked-by-user-agent check
    pub fallback_user_agent: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            dns_timeout: DNS_TIMEOUT,
            dns_max_elapsed: DNS_RETRY_MAX_ELAPSED,
            dns_initial_backoff: Duration::from_millis(DNS_RETRY_INITIAL_DELAY_MS),
            dns_backoff_base: DNS_RETRY_BASE,
            dns_max_backoff: DNS_RETRY_MAX_DELAY,
            port_connect_timeout: PORT_CONNECT_TIMEOUT,
            port_passes: PORT_PASSES,
            http_timeout: HTTP_TIMEOUT,
            slow_response_threshold: HTTP_SLOW_RESPONSE_THRESHOLD,
            max_redirects: MAX_REDIRECTS,
            default_ports: DEFAULT_PORTS.to_vec(),
            fallback_user_agent: FALLBACK_USER_AGENT.to_string(),
        }
    }
}

/// Command-line options.
///
/// # Examples
///
/// ```bash
/// # Default ports (80, 443)
/// endpoint_resolver example.com
///
/// # Explicit ports and a custom header
/// endpoint_resolver example.com --port 8080 --port 8443 --header "X-Scan: 1"
///
/// # Embedded port wins over --port
/// endpoint_resolver 203.0.113.10:8080
/// ```
#[derive(Debug, Parser)]
#[command(
    name = "endpoint_resolver",
    about = "Checks whether an endpoint is reachable and lists its live, in-scope HTTP(S) URLs."
)]
pub struct Opt {
    /// Endpoint to resolve: hostname, IPv4 address, optionally followed by :port
    #[arg(value_parser)]
    pub endpoint: String,

    /// Port to probe (repeatable); ignored when the endpoint embeds a port
    #[arg(long = "port", short = 'p')]
    pub ports: Vec<u16>,

    /// HTTP User-Agent header value for the primary probe
    #[arg(long, default_value = DEFAULT_USER_AGENT)]
    pub user_agent: String,

    /// Extra request header as "Name: Value" (repeatable)
    #[arg(long = "header", short = 'H', value_parser = parse_header)]
    pub headers: Vec<(String, String)>,

    /// External DNS resolver as host:port (repeatable)
    #[arg(long = "dns", default_values_t = DEFAULT_EXTERNAL_DNS.map(String::from))]
    pub external_dns: Vec<String>,

    /// Abort the whole resolution after this many seconds
    #[arg(long)]
    pub deadline: Option<u64>,

    /// Minimum level of log lines written to stderr
    #[arg(long, value_enum, default_value_t = LogLevel::Info)]
    pub log_level: LogLevel,

    /// Format of log lines
    #[arg(long, value_enum, default_value_t = LogFormat::Plain)]
    pub log_format: LogFormat,
}

impl Opt {
    /// Builds the resolution request described by the options.
    pub fn to_request(&self) -> ResolveRequest {
        ResolveRequest {
            endpoint: self.endpoint.clone(),
            ports: self.ports.clone(),
            user_agent: self.user_agent.clone(),
            custom_headers: self.headers.iter().cloned().collect::<HashMap<_, _>>(),
        }
    }
}

fn parse_header(raw: &str) -> Result<(String, String), String> {
    let (name, value) = raw
        .split_once(':')
        .ok_or_else(|| format!("header '{raw}' must look like 'Name: Value'"))?;
    let name = name.trim();
    if name.is_empty() {
        return Err(format!("header '{raw}' has an empty name"));
    }
    Ok((name.to_string(), value.trim().to_string()))
}
