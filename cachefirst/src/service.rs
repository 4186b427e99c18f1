//! Interception boundary as a tower service.
//!
//! The policy itself never times out or limits concurrency. Callers that need
//! bounded latency wrap it with `build_intercept_stack`.

use crate::{CacheFirst, InterceptError, Served};
use cachefirst_cache::Request;
use std::{
    future::Future,
    pin::Pin,
    task::{Context, Poll},
    time::Duration,
};
use tower::{
    BoxError, Service, ServiceBuilder, ServiceExt, limit::ConcurrencyLimitLayer,
    timeout::TimeoutLayer, util::BoxCloneService,
};

pub type InterceptService = BoxCloneService<Request, Served, BoxError>;

impl Service<Request> for CacheFirst {
    type Response = Served;
    type Error = InterceptError;
    type Future =
        Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, request: Request) -> Self::Future {
        let interceptor = self.clone();
        Box::pin(async move { interceptor.handle(&request).await })
    }
}

#[derive(Debug, Clone, Default)]
pub struct InterceptStackOptions {
    /// Upper bound for a whole interception, none by default
    pub timeout: Option<Duration>,
    /// Maximum number of interceptions in flight, unbounded by default
    pub concurrency_limit: Option<usize>,
}

/// Build a boxed, cloneable service around the interceptor with the
/// optional timeout and concurrency limit layers.
pub fn build_intercept_stack(
    interceptor: CacheFirst,
    options: InterceptStackOptions,
) -> InterceptService {
    let service = interceptor.map_err(|err: InterceptError| BoxError::from(err));

    let builder = ServiceBuilder::new()
        .option_layer(options.concurrency_limit.map(ConcurrencyLimitLayer::new))
        .option_layer(options.timeout.map(TimeoutLayer::new));

    BoxCloneService::new(builder.service(service))
}
