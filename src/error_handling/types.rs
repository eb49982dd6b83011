//! Error type definitions.
//!
//! This module defines the fatal resolution errors, the non-fatal warnings
//! attached to successful resolutions, and setup errors.

use log::SetLoggerError;
use reqwest::Error as ReqwestError;
use strum_macros::EnumIter as EnumIterMacro;
use thiserror::Error;

/// Error types for initialization failures.
#[derive(Error, Debug)]
#[allow(clippy::enum_variant_names)] // All variants end with "Error" by convention
pub enum InitializationError {
    /// Error initializing the logger.
    #[error("Logger initialization error: {0}")]
    LoggerError(#[from] SetLoggerError),

    /// Error initializing the HTTP client.
    #[error("HTTP client initialization error: {0}")]
    HttpClientError(#[from] ReqwestError),
}

/// Fatal outcome of a resolution.
///
/// Every stage either hands its output to the next one or terminates the
/// pipeline with exactly one of these. `Cancelled` is never folded into a
/// domain-specific variant.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIterMacro)]
pub enum ResolveError {
    /// The hostname is neither domain-shaped nor an IP literal
    #[error("invalid endpoint")]
    InvalidEndpoint,

    /// The port embedded in the endpoint is not a valid TCP port
    #[error("invalid endpoint port")]
    InvalidEndpointPort,

    /// No external resolver produced a usable answer within the retry window
    #[error("third-party DNS resolution failure")]
    ThirdPartyDnsResolutionFailure,

    /// The local resolver failed to look the hostname up
    #[error("native DNS resolution failure")]
    NativeDnsResolutionFailure,

    /// The hostname resolved, but not to any IPv4 address
    #[error("no IP for endpoint")]
    NoIpForEndpoint,

    /// The endpoint is an IPv6 literal
    #[error("IPv6 addresses are not supported")]
    Ipv6Unsupported,

    /// No candidate port accepted a TCP connection
    #[error("no open port")]
    NoOpenPort,

    /// No HTTP request succeeded with either user agent
    #[error("no HTTP connection")]
    NoHttpConnection,

    /// Requests only succeeded with the fallback user agent
    #[error("blocked by user-agent")]
    BlockedByUserAgent,

    /// The caller cancelled the resolution
    #[error("resolution cancelled")]
    Cancelled,
}

impl ResolveError {
    pub fn is_cancelled(&self) -> bool {
        matches!(self, ResolveError::Cancelled)
    }

    /// Stable machine-readable code, used in logs and CLI output.
    pub fn code(&self) -> &'static str {
        match self {
            ResolveError::InvalidEndpoint => "invalid_endpoint",
            ResolveError::InvalidEndpointPort => "invalid_endpoint_port",
            ResolveError::ThirdPartyDnsResolutionFailure => "third_party_dns_resolution_failure",
            ResolveError::NativeDnsResolutionFailure => "native_dns_resolution_failure",
            ResolveError::NoIpForEndpoint => "no_ip_for_endpoint",
            ResolveError::Ipv6Unsupported => "ipv6_unsupported",
            ResolveError::NoOpenPort => "no_open_port",
            ResolveError::NoHttpConnection => "no_http_connection",
            ResolveError::BlockedByUserAgent => "blocked_by_user_agent",
            ResolveError::Cancelled => "cancelled",
        }
    }
}

/// Non-fatal condition attached to a successful resolution.
///
/// When both hold for the same outcome set, `RedirectedOutOfScope` wins.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIterMacro)]
pub enum Warning {
    /// None of the reached URLs is on the original host and an open port
    #[error("warning: redirection occurred outside scope")]
    RedirectedOutOfScope,

    /// Every successful probe was at or above the slow-response threshold
    #[error("warning: HTTP timeout")]
    HttpTimeout,
}

impl Warning {
    pub fn code(&self) -> &'static str {
        match self {
            Warning::RedirectedOutOfScope => "redirected_out_of_scope",
            Warning::HttpTimeout => "http_timeout",
        }
    }
}
