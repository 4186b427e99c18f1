//! Cache-first fetch interception.
//!
//! For every intercepted request the named cache store is consulted first.
//! A hit is returned as is, without touching the network and without any
//! freshness check. On a miss the request goes to the network, and the
//! response is written back to the store when it is successful or opaque.
//!
//! Concurrent interceptions of the same request are not coordinated: both may
//! miss, both may fetch and the last cache write wins.

use crate::{
    AbstractFetcher, DiagnosticSink, InterceptError, NetworkResult, TracingSink,
};
use cachefirst_cache::{AbstractCacheStorage, Request, Response};
use cachefirst_config::PolicyParams;
use std::sync::Arc;
use tracing::{debug, instrument};

/// What an interception produced and where it came from.
#[derive(Debug, Clone, PartialEq)]
pub enum Served {
    /// Answered from the cache store, the network was not consulted
    CacheHit(Response),
    /// Answered by the network after a miss
    Network(Response),
    /// The network produced no response; nothing was cached
    Empty,
}

impl Served {
    pub fn response(&self) -> Option<&Response> {
        match self {
            Served::CacheHit(response) | Served::Network(response) => Some(response),
            Served::Empty => None,
        }
    }

    pub fn into_response(self) -> Option<Response> {
        match self {
            Served::CacheHit(response) | Served::Network(response) => Some(response),
            Served::Empty => None,
        }
    }

    pub fn is_cache_hit(&self) -> bool {
        matches!(self, Served::CacheHit(_))
    }
}

/// How a network response was handled on its way back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CacheWrite {
    Added,
    Put,
    Skipped,
}

/// Cache-first fetch interceptor over injected storage, network and
/// diagnostics collaborators. Cheap to clone.
#[derive(Clone)]
pub struct CacheFirst {
    storage: AbstractCacheStorage,
    fetcher: AbstractFetcher,
    sink: Arc<dyn DiagnosticSink>,
    params: PolicyParams,
}

impl CacheFirst {
    pub fn new(storage: AbstractCacheStorage, fetcher: AbstractFetcher) -> Self {
        Self {
            storage,
            fetcher,
            sink: Arc::new(TracingSink),
            params: PolicyParams::default(),
        }
    }

    pub fn with_params(mut self, params: PolicyParams) -> Self {
        self.params = params;
        self
    }

    pub fn with_sink(mut self, sink: Arc<dyn DiagnosticSink>) -> Self {
        self.sink = sink;
        self
    }

    pub fn cache_name(&self) -> &str {
        &self.params.cache_name
    }

    /// Intercept `request` using the configured cache name.
    pub async fn handle(&self, request: &Request) -> Result<Served, InterceptError> {
        self.fetch_cache_first(&self.params.cache_name, request).await
    }

    /// Serve `request` from the store `cache_name`, falling back to the
    /// network and populating the store on a miss.
    ///
    /// Transport failures propagate untouched. A network response that is
    /// neither successful nor cacheable-opaque is returned but not stored,
    /// and the diagnostic sink is told about it.
    #[instrument(skip(self, request), fields(url = %request.url()))]
    pub async fn fetch_cache_first(
        &self,
        cache_name: &str,
        request: &Request,
    ) -> Result<Served, InterceptError> {
        let store = self.storage.open(cache_name).await?;
        if let Some(cached) = store.match_request(request).await? {
            debug!("Cache hit");
            return Ok(Served::CacheHit(cached));
        }

        debug!("Cache miss, fetching from network");
        match self.fetch_from_network(request).await {
            NetworkResult::Response(response) => {
                let write = self.add_to_cache(cache_name, request, &response).await?;
                debug!(status = response.status, ?write, "Network response");
                Ok(Served::Network(response))
            }
            NetworkResult::Empty => {
                debug!("Network returned no response");
                Ok(Served::Empty)
            }
            NetworkResult::TransportError(e) => Err(e.into()),
        }
    }

    async fn fetch_from_network(&self, request: &Request) -> NetworkResult {
        self.fetcher.fetch(request).await
    }

    async fn add_to_cache(
        &self,
        cache_name: &str,
        request: &Request,
        response: &Response,
    ) -> Result<CacheWrite, InterceptError> {
        let store = self.storage.open(cache_name).await?;
        if response.ok() {
            store.add(request, response.clone()).await?;
            Ok(CacheWrite::Added)
        } else if response.is_opaque() && self.params.cache_opaque {
            store.put(request, response.clone()).await?;
            Ok(CacheWrite::Put)
        } else {
            self.sink.uncacheable(request, response);
            Ok(CacheWrite::Skipped)
        }
    }
}

impl std::fmt::Debug for CacheFirst {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CacheFirst")
            .field("cache_name", &self.params.cache_name)
            .field("cache_opaque", &self.params.cache_opaque)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cachefirst_cache::ResponseType;

    #[test]
    fn test_served_accessors() {
        let response = Response::new(200, "body");

        let hit = Served::CacheHit(response.clone());
        assert!(hit.is_cache_hit());
        assert_eq!(hit.response(), Some(&response));

        let network = Served::Network(response.clone());
        assert!(!network.is_cache_hit());
        assert_eq!(network.into_response(), Some(response));

        assert_eq!(Served::Empty.response(), None);
        assert_eq!(Served::Empty.into_response(), None);
    }

    #[test]
    fn test_served_keeps_opaque_kind() {
        let served = Served::Network(Response::opaque());
        let response = served.into_response().unwrap();
        assert_eq!(response.kind, ResponseType::Opaque);
    }
}
