use crate::{CacheKey, Response};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A response stored in a cache store, together with its key.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CacheEntry {
    /// Identity of the request the response answers
    pub key: CacheKey,
    /// The cached response
    pub response: Response,
    /// When this entry was written
    pub cached_at: DateTime<Utc>,
}

impl CacheEntry {
    pub fn new(key: CacheKey, response: Response) -> Self {
        Self {
            key,
            response,
            cached_at: Utc::now(),
        }
    }
}
