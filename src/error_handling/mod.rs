//! Error handling for the resolution pipeline.
//!
//! This module provides:
//! - Fatal resolution error codes
//! - Non-fatal warnings attached to successful resolutions
//! - Initialization errors
//! - The external DNS retry strategy
//! - Labels for transport errors that probes skip over

mod categorization;
mod types;

// Re-export public API
pub use categorization::{categorize_dns_error, categorize_reqwest_error, get_dns_retry_strategy};
pub use types::{InitializationError, ResolveError, Warning};
