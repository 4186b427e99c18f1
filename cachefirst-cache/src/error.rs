use thiserror::Error;

#[derive(Error, Debug)]
pub enum CacheError {
    #[error("Refusing to add response with status {0}")]
    NotOk(u16),

    #[error("Only GET requests can be cached, got {0}")]
    MethodNotCacheable(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[cfg(feature = "mongodb")]
    #[error("MongoDB error: {0}")]
    Mongo(#[from] mongodb::error::Error),

    #[cfg(feature = "mongodb")]
    #[error("MongoDB serialization error: {0}")]
    MongoBsonSer(#[from] mongodb::bson::ser::Error),
}
