//! The network side of the interceptor.

use crate::FetchError;
use async_trait::async_trait;
use cachefirst_cache::{Request, Response};
use std::sync::Arc;

/// Outcome of asking the network for a request.
#[derive(Debug)]
pub enum NetworkResult {
    /// The network produced a response, successful or not
    Response(Response),
    /// The network produced nothing usable
    Empty,
    /// The transport failed before any response arrived
    TransportError(FetchError),
}

impl From<Result<Option<Response>, FetchError>> for NetworkResult {
    fn from(result: Result<Option<Response>, FetchError>) -> Self {
        match result {
            Ok(Some(response)) => NetworkResult::Response(response),
            Ok(None) => NetworkResult::Empty,
            Err(e) => NetworkResult::TransportError(e),
        }
    }
}

/// Network collaborator consulted on cache misses. Implementations must not
/// retry or time out on their own behalf unless configured to.
#[async_trait]
pub trait Fetcher: Send + Sync {
    async fn fetch(&self, request: &Request) -> NetworkResult;
}

pub type AbstractFetcher = Arc<dyn Fetcher + Send + Sync>;
