use cachefirst_cache::CacheError;
use cachefirst_config::ConfigError;
use thiserror::Error;

/// Transport-level failure of the network collaborator.
#[derive(Error, Debug)]
pub enum FetchError {
    #[cfg(feature = "http")]
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Transport error: {0}")]
    Transport(String),
}

/// Failure of a single interception.
#[derive(Error, Debug)]
pub enum InterceptError {
    #[error("Network fetch failed: {0}")]
    Transport(#[from] FetchError),
    #[error("Cache error: {0}")]
    Cache(#[from] CacheError),
}

/// Failure while assembling an interceptor from configuration.
#[derive(Error, Debug)]
pub enum SetupError {
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
    #[cfg(feature = "http")]
    #[error("HTTP client error: {0}")]
    Client(#[from] reqwest::Error),
}
