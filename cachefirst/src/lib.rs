//! # cachefirst - cache-first fetch interception
//!
//! `cachefirst` answers outgoing requests from a named cache store when it
//! can and falls back to the network when it cannot, writing successful (and
//! opaque) network responses back into the store.
//!
//! ## Features
//!
//! - **Injected collaborators**: cache storage (`CacheStorage`), network
//!   (`Fetcher`) and diagnostics (`DiagnosticSink`) are traits, so the policy
//!   runs the same against the in-memory store, MongoDB or test doubles.
//! - **Explicit outcomes**: the network reports `NetworkResult`, an
//!   interception reports `Served` (cache hit, network, or empty).
//! - **Tower integration**: `CacheFirst` is a `tower::Service<Request>`;
//!   timeouts and concurrency limits are opt-in layers.
//! - **reqwest fetcher** (`http` feature, on by default) with browser-like
//!   basic/cors/opaque classification.
//!
//! ## Modules
//!
//! - `cache`: request/response model and storage backends.
//! - `config`: YAML configuration, HTTP client and policy parameters.
//! - `interceptor`: the cache-first policy.
//! - `fetch`: the network collaborator trait.
//! - `service`: tower service stack.
mod diagnostics;
mod error;
pub mod fetch;
#[cfg(feature = "http")]
pub mod http;
pub mod interceptor;
pub mod service;

pub use cachefirst_cache as cache;
pub use cachefirst_config as config;
pub use diagnostics::{DiagnosticSink, TracingSink};
pub use error::{FetchError, InterceptError, SetupError};
pub use fetch::{AbstractFetcher, Fetcher, NetworkResult};
#[cfg(feature = "http")]
pub use http::HttpFetcher;
pub use interceptor::{CacheFirst, Served};
pub use service::{InterceptService, InterceptStackOptions, build_intercept_stack};

pub use cachefirst_cache::{
    CacheStorage, CacheStore, InMemoryCacheStorage, Request, RequestMode, Response,
    ResponseType,
};
pub use cachefirst_config::PolicyParams;

// re-export
pub use async_trait;
#[cfg(feature = "http")]
pub use reqwest;
pub use tower;
pub use tracing;
pub use tracing_subscriber;
