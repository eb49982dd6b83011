//! Cancellation helpers.
//!
//! Every network await in the pipeline goes through `cancellable` so a
//! cancelled token aborts it at once instead of waiting out its timeout.

use std::future::Future;

use tokio_util::sync::CancellationToken;

use crate::error_handling::ResolveError;

/// Runs `future` unless `cancel` fires first.
///
/// Cancellation is checked first, so an already-cancelled token never polls
/// the future.
///
/// # Errors
///
/// Returns `ResolveError::Cancelled` if the token is cancelled before the
/// future completes.
pub async fn cancellable<F, T>(cancel: &CancellationToken, future: F) -> Result<T, ResolveError>
where
    F: Future<Output = T>,
{
    tokio::select! {
        biased;
        _ = cancel.cancelled() => Err(ResolveError::Cancelled),
        output = future => Ok(output),
    }
}
