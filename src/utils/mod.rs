//! Shared utilities.
//!
//! This module provides:
//! - A cancellation-aware wrapper for network awaits
//! - Duration formatting for log lines

mod cancel;

pub use cancel::cancellable;

use std::time::Duration;

/// Converts a duration to fractional milliseconds for log output.
pub fn duration_to_ms(duration: Duration) -> f64 {
    duration.as_secs_f64() * 1000.0
}

#[cfg(test)]
mod tests {
    include!("tests.rs");
}
