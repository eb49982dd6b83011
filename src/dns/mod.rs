//! DNS verification.
//!
//! Two independent checks guard against targets that resolve differently
//! depending on the resolver path (split-horizon, DNS-based evasion):
//! - `verify_external()` - an A query against caller-supplied external resolvers
//! - `resolve_native()` - a lookup through the local system resolver, filtered to IPv4
//!
//! Both use `hickory-resolver`/`tokio` and honor a `CancellationToken`.

mod external;
mod native;

// Re-export public API
pub use external::verify_external;
pub use native::resolve_native;
