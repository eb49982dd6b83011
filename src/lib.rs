//! endpoint_resolver library: endpoint reachability and HTTP scope probing
//!
//! Given an endpoint (`hostname` or `hostname:port`), the resolver decides
//! whether it is reachable and which HTTP(S) URLs serve it, without ever
//! following a redirect outside the endpoint's own domain scope.
//!
//! A resolution runs these stages in order, stopping at the first failure:
//! external DNS verification, native DNS resolution (domains only), TCP port
//! probing and HTTP probing.
//!
//! # Example
//!
//! ```no_run
//! use endpoint_resolver::{
//!     new_resolver_with_logging, CancellationToken, Config, ResolveRequest, Resolver,
//! };
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let resolver = new_resolver_with_logging(vec!["8.8.8.8:53".to_string()], Config::default())?;
//! let request = ResolveRequest {
//!     endpoint: "example.com".to_string(),
//!     user_agent: "scanner/1.0".to_string(),
//!     ..Default::default()
//! };
//!
//! let resolution = resolver.resolve(&CancellationToken::new(), &request).await?;
//! for url in &resolution.urls {
//!     println!("{url}");
//! }
//! if let Some(warning) = resolution.warning {
//!     eprintln!("{warning}");
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Requirements
//!
//! This library requires a Tokio runtime. Every operation takes a
//! `CancellationToken`; cancelling it aborts the resolution promptly with
//! `ResolveError::Cancelled`.

mod checker;
pub mod config;
mod dns;
mod domain;
mod endpoint;
mod error_handling;
mod fetch;
pub mod initialization;
mod models;
mod ports;
mod resolver;
mod utils;

// Re-export public API
pub use checker::{Checker, LoggingChecker, NetworkChecker};
pub use config::{Config, LogFormat, LogLevel, Opt};
pub use endpoint::{classify_host, Endpoint, HostKind};
pub use error_handling::{InitializationError, ResolveError, Warning};
pub use fetch::scoped_redirect_policy;
pub use models::{ResolveRequest, Resolution};
pub use resolver::{new_resolver_with_logging, EndpointResolver, LoggingResolver, Resolver};
pub use tokio_util::sync::CancellationToken;
