//! Named cache storage for cache-first fetch interception.
//!
//! This crate holds the request/response data model and a trait-based cache
//! storage API with pluggable backends. A `CacheStorage` hands out named
//! `CacheStore`s, each mapping requests to the responses cached for them.
//!
//! Currently supported backends:
//! - In-memory (always available)
//! - MongoDB (with the "mongodb" feature)

mod entry;
mod error;
mod memory;
#[cfg(feature = "mongodb")]
mod mongo;
mod request;
mod response;
mod storage;

pub use entry::CacheEntry;
pub use error::CacheError;
pub use memory::{InMemoryCacheStorage, InMemoryCacheStore};
#[cfg(feature = "mongodb")]
pub use mongo::{MongoCacheStorage, MongoCacheStore};
pub use request::{CacheKey, Request, RequestMode};
pub use response::{Response, ResponseType};
pub use storage::{AbstractCacheStorage, CacheStorage, CacheStore};

// re-export
pub use bytes;
pub use http;
pub use url;
