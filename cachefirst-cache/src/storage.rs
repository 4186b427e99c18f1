//! Traits backends implement to act as named cache storage.
//!
//! `CacheStorage` is the registry of named stores, `CacheStore` is a single
//! store mapping requests to responses.

use crate::{CacheError, CacheKey, Request, Response};
use async_trait::async_trait;
use std::sync::Arc;

/// Registry of named cache stores.
#[async_trait]
pub trait CacheStorage: Send + Sync {
    /// Open the store called `name`, creating it if absent. Opening the same
    /// name twice yields handles to the same underlying store.
    async fn open(&self, name: &str) -> Result<Arc<dyn CacheStore>, CacheError>;

    /// Check whether a store called `name` exists
    async fn has(&self, name: &str) -> Result<bool, CacheError>;

    /// Remove the store called `name`, returns false if there was none
    async fn delete(&self, name: &str) -> Result<bool, CacheError>;

    /// Names of all stores, sorted
    async fn keys(&self) -> Result<Vec<String>, CacheError>;
}

/// Reject requests a cache store must not hold. Backends call this before
/// every write.
pub(crate) fn ensure_cacheable(request: &Request) -> Result<(), CacheError> {
    if request.is_cacheable() {
        Ok(())
    } else {
        Err(CacheError::MethodNotCacheable(request.method().to_string()))
    }
}

/// A single named store of request/response pairs. Only GET requests are
/// stored: writes for other methods fail with `CacheError::MethodNotCacheable`
/// and lookups for them always miss.
#[async_trait]
pub trait CacheStore: Send + Sync {
    /// Find the response stored for `request`
    async fn match_request(
        &self,
        request: &Request,
    ) -> Result<Option<Response>, CacheError>;

    /// Store a successful response. Responses outside the 2xx range are
    /// rejected with `CacheError::NotOk`.
    async fn add(
        &self,
        request: &Request,
        response: Response,
    ) -> Result<(), CacheError>;

    /// Store any response, overwriting the previous one for the same key
    async fn put(
        &self,
        request: &Request,
        response: Response,
    ) -> Result<(), CacheError>;

    /// Remove the entry for `request`, returns false if there was none
    async fn delete(&self, request: &Request) -> Result<bool, CacheError>;

    /// Keys of all stored entries, sorted
    async fn keys(&self) -> Result<Vec<CacheKey>, CacheError>;
}

pub type AbstractCacheStorage = Arc<dyn CacheStorage + Send + Sync>;
