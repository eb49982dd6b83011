//! Resolver configuration and constants.
//!
//! This module provides:
//! - Default timeouts, retry bounds and thresholds
//! - The `Config` value handed to every component at construction time
//! - CLI option types and parsing

mod constants;
mod types;

// Re-export all constants
pub use constants::*;
pub use types::{Config, LogFormat, LogLevel, Opt};
