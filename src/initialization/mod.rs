//! Application initialization and resource setup.
//!
//! This module provides functions to initialize shared resources:
//! - Logger
//! - HTTP probe client
//! - Single-nameserver DNS resolvers for the external check

mod client;
mod logger;
mod resolver;

// Re-export public API
pub use client::init_probe_client;
pub use logger::init_logger_with;
pub use resolver::{init_external_resolver, parse_resolver_address};
