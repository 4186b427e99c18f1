//! reqwest-backed network collaborator.
//!
//! Responses are classified the way a browser classifies them for the client
//! context at `origin`: same-origin responses are `basic`, readable
//! cross-origin ones are `cors`, and cross-origin `no-cors` responses are
//! filtered down to `opaque`.

use crate::{CacheFirst, FetchError, Fetcher, NetworkResult, SetupError};
use async_trait::async_trait;
use cachefirst_cache::{
    AbstractCacheStorage, Request, RequestMode, Response, ResponseType,
};
use cachefirst_config::{
    PolicyParams,
    http::{HttpClientParams, build_http_client},
};
use std::sync::Arc;
use tracing::debug;
use url::Url;

#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: reqwest::Client,
    origin: Option<Url>,
}

impl HttpFetcher {
    pub fn new(client: reqwest::Client, origin: Option<Url>) -> Self {
        Self { client, origin }
    }

    pub fn from_params(params: &HttpClientParams) -> Result<Self, reqwest::Error> {
        let client = build_http_client(params)?;
        Ok(Self::new(client, params.origin.clone()))
    }

    /// Without a configured origin every request counts as same-origin.
    fn is_cross_origin(&self, url: &Url) -> bool {
        match &self.origin {
            Some(origin) => origin.origin() != url.origin(),
            None => false,
        }
    }

    async fn send(&self, request: &Request) -> Result<Response, FetchError> {
        let cross_origin = self.is_cross_origin(request.url());
        if cross_origin && request.mode() == RequestMode::SameOrigin {
            return Err(FetchError::Transport(format!(
                "cross-origin request to {} in same-origin mode",
                request.url()
            )));
        }

        let response = self
            .client
            .request(request.method().clone(), request.url().clone())
            .headers(request.headers().clone())
            .send()
            .await?;

        // a redirect to another origin taints the response
        let url = response.url().clone();
        let cross_origin = cross_origin || self.is_cross_origin(&url);
        if cross_origin && request.mode() == RequestMode::SameOrigin {
            return Err(FetchError::Transport(format!(
                "same-origin request to {} redirected to {}",
                request.url(),
                url
            )));
        }

        if cross_origin && request.mode() == RequestMode::NoCors {
            debug!(%url, "Filtering cross-origin response to opaque");
            return Ok(Response::opaque());
        }

        let status = response.status().as_u16();
        let headers = response.headers().clone();
        let body = response.bytes().await?;

        let kind = if cross_origin {
            ResponseType::Cors
        } else {
            ResponseType::Basic
        };

        Ok(Response {
            url: Some(url),
            status,
            headers,
            body,
            kind,
        })
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(&self, request: &Request) -> NetworkResult {
        self.send(request).await.map(Some).into()
    }
}

impl CacheFirst {
    /// Build an interceptor with an `HttpFetcher` from the `http` section
    /// and policy parameters from the `cache` section of `config`.
    pub fn from_config(
        config: &serde_yaml::Value,
        storage: AbstractCacheStorage,
    ) -> Result<Self, SetupError> {
        let http_params = HttpClientParams::from_config(&config["http"])?;
        let policy = PolicyParams::from_config(&config["cache"])?;
        let fetcher = HttpFetcher::from_params(&http_params)?;
        Ok(CacheFirst::new(storage, Arc::new(fetcher)).with_params(policy))
    }
}
