use crate::{
    CacheEntry, CacheError, CacheKey, CacheStorage, CacheStore, Request, Response,
    storage::ensure_cacheable,
};
use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{
    Collection, Database, IndexModel,
    bson::{self, Document, doc},
    options::IndexOptions,
};
use std::sync::Arc;
use tracing::{debug, info};

fn key_filter(key: &CacheKey) -> Document {
    doc! { "key.method": key.method.as_str(), "key.url": key.url.as_str() }
}

/// MongoDB implementation of cache storage. Each named store is a collection
/// called `{prefix}{name}`.
#[derive(Debug, Clone)]
pub struct MongoCacheStorage {
    pub db: Database,
    pub prefix: String,
}

impl MongoCacheStorage {
    pub fn new(db: Database, prefix: &str) -> Self {
        Self {
            db,
            prefix: prefix.to_string(),
        }
    }

    fn collection_name(&self, name: &str) -> String {
        format!("{}{}", self.prefix, name)
    }
}

#[async_trait]
impl CacheStorage for MongoCacheStorage {
    async fn open(&self, name: &str) -> Result<Arc<dyn CacheStore>, CacheError> {
        let store =
            MongoCacheStore::new(self.db.clone(), &self.collection_name(name))
                .await?;
        Ok(Arc::new(store))
    }

    async fn has(&self, name: &str) -> Result<bool, CacheError> {
        let collections = self.db.list_collection_names().await?;
        Ok(collections.contains(&self.collection_name(name)))
    }

    async fn delete(&self, name: &str) -> Result<bool, CacheError> {
        if !self.has(name).await? {
            return Ok(false);
        }
        self.db
            .collection::<CacheEntry>(&self.collection_name(name))
            .drop()
            .await?;
        info!("Dropped cache collection for store: {}", name);
        Ok(true)
    }

    async fn keys(&self) -> Result<Vec<String>, CacheError> {
        let mut names: Vec<String> = self
            .db
            .list_collection_names()
            .await?
            .into_iter()
            .filter_map(|c| c.strip_prefix(&self.prefix).map(str::to_string))
            .collect();
        names.sort();
        Ok(names)
    }
}

/// A single cache store backed by one MongoDB collection
#[derive(Debug, Clone)]
pub struct MongoCacheStore {
    pub collection: Collection<CacheEntry>,
}

impl MongoCacheStore {
    pub async fn new(
        db: Database,
        collection_name: &str,
    ) -> Result<Self, CacheError> {
        let collection = db.collection(collection_name);
        let store = Self { collection };
        store.setup_indexes().await?;
        Ok(store)
    }

    /// Unique index on the request key, creates the collection if missing
    pub async fn setup_indexes(&self) -> Result<(), CacheError> {
        let key_index = IndexModel::builder()
            .keys(doc! { "key.method": 1, "key.url": 1 })
            .options(IndexOptions::builder().unique(true).build())
            .build();

        self.collection.create_index(key_index).await?;
        debug!("Cache indexes ready on {}", self.collection.name());
        Ok(())
    }

    async fn upsert(
        &self,
        request: &Request,
        response: Response,
    ) -> Result<(), CacheError> {
        ensure_cacheable(request)?;
        let key = request.cache_key();
        let entry = CacheEntry::new(key.clone(), response);
        let doc = bson::to_document(&entry)?;

        self.collection
            .update_one(key_filter(&key), doc! { "$set": doc })
            .upsert(true)
            .await?;

        debug!("Cached response for key: {}", key);
        Ok(())
    }
}

#[async_trait]
impl CacheStore for MongoCacheStore {
    async fn match_request(
        &self,
        request: &Request,
    ) -> Result<Option<Response>, CacheError> {
        if !request.is_cacheable() {
            return Ok(None);
        }
        let key = request.cache_key();
        let entry = self
            .collection
            .find_one(key_filter(&key))
            .await?;
        Ok(entry.map(|e| e.response))
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
        self.upsert(request, response).await
    }

    async fn put(
        &self,
        request: &Request,
        response: Response,
    ) -> Result<(), CacheError> {
        self.upsert(request, response).await
    }

    async fn delete(&self, request: &Request) -> Result<bool, CacheError> {
        let key = request.cache_key();
        let result = self
            .collection
            .delete_one(key_filter(&key))
            .await?;
        Ok(result.deleted_count > 0)
    }

    async fn keys(&self) -> Result<Vec<CacheKey>, CacheError> {
        let entries: Vec<CacheEntry> =
            self.collection.find(doc! {}).await?.try_collect().await?;
        let mut keys: Vec<CacheKey> = entries.into_iter().map(|e| e.key).collect();
        keys.sort();
        Ok(keys)
    }
}
