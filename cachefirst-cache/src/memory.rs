//! In-memory implementation of the cache storage traits. Stores live as long
//! as the `InMemoryCacheStorage` that created them.
use crate::{
    CacheEntry, CacheError, CacheKey, CacheStorage, CacheStore, Request, Response,
    storage::ensure_cacheable,
};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tracing::debug;

#[derive(Default)]
pub struct InMemoryCacheStorage {
    pub stores: Mutex<HashMap<String, Arc<InMemoryCacheStore>>>,
}

impl InMemoryCacheStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CacheStorage for InMemoryCacheStorage {
    async fn open(&self, name: &str) -> Result<Arc<dyn CacheStore>, CacheError> {
        let mut stores = self
            .stores
            .lock()
            .map_err(|e| CacheError::Storage(e.to_string()))?;
        let store: Arc<dyn CacheStore> = stores
            .entry(name.to_string())
            .or_insert_with(|| {
                debug!("Creating in-memory cache store: {}", name);
                Arc::new(InMemoryCacheStore::new())
            })
            .clone();
        Ok(store)
    }

    async fn has(&self, name: &str) -> Result<bool, CacheError> {
        let stores = self
            .stores
            .lock()
            .map_err(|e| CacheError::Storage(e.to_string()))?;
        Ok(stores.contains_key(name))
    }

    async fn delete(&self, name: &str) -> Result<bool, CacheError> {
        let mut stores = self
            .stores
            .lock()
            .map_err(|e| CacheError::Storage(e.to_string()))?;
        Ok(stores.remove(name).is_some())
    }

    async fn keys(&self) -> Result<Vec<String>, CacheError> {
        let stores = self
            .stores
            .lock()
            .map_err(|e| CacheError::Storage(e.to_string()))?;
        let mut names: Vec<String> = stores.keys().cloned().collect();
        names.sort();
        Ok(names)
    }
}

impl std::fmt::Debug for InMemoryCacheStorage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let stores = self.stores.lock().map_err(|_| std::fmt::Error)?;
        let mut names: Vec<&String> = stores.keys().collect();
        names.sort();

        f.debug_struct("InMemoryCacheStorage")
            .field("stores", &names)
            .finish()
    }
}

#[derive(Default)]
pub struct InMemoryCacheStore {
    pub entries: Mutex<HashMap<CacheKey, CacheEntry>>,
}

impl InMemoryCacheStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn insert(&self, request: &Request, response: Response) -> Result<(), CacheError> {
        ensure_cacheable(request)?;
        let mut entries = self
            .entries
            .lock()
            .map_err(|e| CacheError::Storage(e.to_string()))?;
        let key = request.cache_key();
        debug!("Caching response for key: {}", key);
        entries.insert(key.clone(), CacheEntry::new(key, response));
        Ok(())
    }
}

#[async_trait]
impl CacheStore for InMemoryCacheStore {
    async fn match_request(
        &self,
        request: &Request,
    ) -> Result<Option<Response>, CacheError> {
        if !request.is_cacheable() {
            return Ok(None);
        }
        let entries = self
            .entries
            .lock()
            .map_err(|e| CacheError::Storage(e.to_string()))?;
        Ok(entries
            .get(&request.cache_key())
            .map(|entry| entry.response.clone()))
    }

    async fn add(
        &self,
        request: &Request,
        response: Response,
    ) -> Result<(), CacheError> {
        ensure_cacheable(request)?;
        if !response.ok() {
            return Err(CacheError::NotOk(response.status));
        }
        self.insert(request, response)
    }

    async fn put(
        &self,
        request: &Request,
        response: Response,
    ) -> Result<(), CacheError> {
        self.insert(request, response)
    }

    async fn delete(&self, request: &Request) -> Result<bool, CacheError> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|e| CacheError::Storage(e.to_string()))?;
        Ok(entries.remove(&request.cache_key()).is_some())
    }

    async fn keys(&self) -> Result<Vec<CacheKey>, CacheError> {
        let entries = self
            .entries
            .lock()
            .map_err(|e| CacheError::Storage(e.to_string()))?;
        let mut keys: Vec<CacheKey> = entries.keys().cloned().collect();
        keys.sort();
        Ok(keys)
    }
}

impl std::fmt::Debug for InMemoryCacheStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let entries = self.entries.lock().map_err(|_| std::fmt::Error)?;

        f.debug_struct("InMemoryCacheStore")
            .field("entries_size", &entries.len())
            .finish()
    }
}
