use std::time::Instant;

use async_trait::async_trait;
use log::debug;
use tokio_util::sync::CancellationToken;

use crate::checker::logging::log_outcome;
use crate::error_handling::ResolveError;
use crate::models::{ResolveRequest, Resolution};
use crate::resolver::Resolver;

/// Wraps a `Resolver` and logs each resolution with its elapsed time.
#[derive(Debug, Clone)]
pub struct LoggingResolver<R> {
    inner: R,
    instance: String,
}

impl<R: Resolver> LoggingResolver<R> {
    pub fn new(inner: R, instance: impl Into<String>) -> Self {
        Self {
            inner,
            instance: instance.into(),
        }
    }

    pub fn inner(&self) -> &R {
        &self.inner
    }
}

#[async_trait]
impl<R: Resolver> Resolver for LoggingResolver<R> {
    async fn resolve(
        &self,
        cancel: &CancellationToken,
        request: &ResolveRequest,
    ) -> Result<Resolution, ResolveError> {
        debug!(
            "[{}] resolve endpoint={} ports={:?} user_agent={:?}",
            self.instance, request.endpoint, request.ports, request.user_agent
        );
        let started = Instant::now();
        let outcome = self.inner.resolve(cancel, request).await;
        log_outcome(&self.instance, "resolve", started, &outcome);
        outcome
    }
}
