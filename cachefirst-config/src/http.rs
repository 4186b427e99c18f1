//! HTTP client configuration for the network side of the interceptor.
//!
//! # Example
//! ```no_run
//! use cachefirst_config::http::{HttpClientParams, build_http_client};
//! use serde_yaml::Value;
//!
//! let config: Value = serde_yaml::from_str(r#"
//! http:
//!     timeout: 30
//!     connect_timeout: 10
//!     origin: https://app.example.com
//! "#).unwrap();
//!
//! let params = HttpClientParams::from_config(&config["http"]).unwrap();
//! let client = build_http_client(&params).unwrap();
//! ```
use crate::config::{ConfigError, optional_str};
use std::time::Duration;
use url::Url;

pub const DEFAULT_USER_AGENT: &str =
    concat!("cachefirst/", env!("CARGO_PKG_VERSION"));

/// Parameters for configuring the HTTP client used on cache misses.
#[derive(Debug, Clone, PartialEq)]
pub struct HttpClientParams {
    /// Whole-request timeout, seconds
    pub timeout: u64,
    pub connect_timeout: u64,
    pub user_agent: String,
    /// Origin of the client context. Cross-origin `no-cors` requests get
    /// opaque responses; without an origin every request counts as
    /// same-origin.
    pub origin: Option<Url>,
}

impl HttpClientParams {
    /// Creates params from the `http` section of a YAML configuration:
    /// ```yaml
    /// http:
    ///     timeout: 30
    ///     connect_timeout: 10
    ///     user_agent: my-app/1.0
    ///     origin: https://app.example.com
    /// ```
    /// `timeout` and `connect_timeout` are required.
    pub fn from_config(http_config: &serde_yaml::Value) -> Result<Self, ConfigError> {
        let timeout = http_config["timeout"]
            .as_u64()
            .ok_or(ConfigError::MissingField("http.timeout"))?;
        let connect_timeout = http_config["connect_timeout"]
            .as_u64()
            .ok_or(ConfigError::MissingField("http.connect_timeout"))?;
        let user_agent = optional_str(http_config, "http.user_agent")?
            .unwrap_or(DEFAULT_USER_AGENT)
            .to_string();
        let origin = optional_str(http_config, "http.origin")?
            .map(|origin| {
                Url::parse(origin).map_err(|e| ConfigError::InvalidValue {
                    field: "http.origin",
                    reason: e.to_string(),
                })
            })
            .transpose()?;

        Ok(Self {
            timeout,
            connect_timeout,
            user_agent,
            origin,
        })
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout)
    }
}

impl Default for HttpClientParams {
    fn default() -> Self {
        Self {
            timeout: 30,
            connect_timeout: 10,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            origin: None,
        }
    }
}

/// Builds a reqwest client with TLS, timeouts and user agent from `params`.
#[cfg(feature = "http")]
pub fn build_http_client(
    params: &HttpClientParams,
) -> Result<reqwest::Client, reqwest::Error> {
    reqwest::ClientBuilder::new()
        .use_rustls_tls()
        .timeout(Duration::from_secs(params.timeout))
        .connect_timeout(Duration::from_secs(params.connect_timeout))
        .user_agent(params.user_agent.as_str())
        .build()
}
