use http::{HeaderMap, Method};
use serde::{Deserialize, Serialize};
use std::fmt;
use url::Url;

/// How a request treats cross-origin responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RequestMode {
    /// Cross-origin responses are readable (CORS).
    #[default]
    Cors,
    /// Cross-origin responses come back opaque.
    NoCors,
    /// Only same-origin requests are allowed.
    SameOrigin,
}

/// An outgoing request captured at the interception boundary.
#[derive(Debug, Clone)]
pub struct Request {
    method: Method,
    url: Url,
    headers: HeaderMap,
    mode: RequestMode,
}

impl Request {
    pub fn new(method: Method, url: Url) -> Self {
        Self {
            method,
            url,
            headers: HeaderMap::new(),
            mode: RequestMode::default(),
        }
    }

    pub fn get(url: Url) -> Self {
        Self::new(Method::GET, url)
    }

    /// Parse `url` and build a GET request for it.
    pub fn parse(url: &str) -> Result<Self, url::ParseError> {
        Ok(Self::get(Url::parse(url)?))
    }

    pub fn with_mode(mut self, mode: RequestMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_headers(mut self, headers: HeaderMap) -> Self {
        self.headers = headers;
        self
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    pub fn mode(&self) -> RequestMode {
        self.mode
    }

    /// Only GET requests can be stored in or served from a cache store.
    pub fn is_cacheable(&self) -> bool {
        self.method == Method::GET
    }

    /// Key under which responses for this request are stored.
    pub fn cache_key(&self) -> CacheKey {
        CacheKey::from(self)
    }
}

/// Identity of a request inside a cache store: the method and the URL with
/// its fragment stripped.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CacheKey {
    pub method: String,
    pub url: String,
}

impl From<&Request> for CacheKey {
    fn from(request: &Request) -> Self {
        let mut url = request.url.clone();
        url.set_fragment(None);
        Self {
            method: request.method.as_str().to_string(),
            url: url.to_string(),
        }
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.method, self.url)
    }
}
