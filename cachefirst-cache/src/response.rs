use bytes::Bytes;
use http::{HeaderMap, HeaderName, HeaderValue};
use serde::{Deserialize, Serialize};
use url::Url;

/// Where a response came from, as far as the requesting context can tell.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ResponseType {
    /// Same-origin response, fully readable
    #[default]
    Basic,
    /// Cross-origin response allowed by CORS
    Cors,
    /// Cross-origin response with status, headers and body hidden
    Opaque,
    /// Network error placeholder
    Error,
}

/// A response produced by the network or served from a cache store.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Response {
    /// Final URL after redirects, if known
    pub url: Option<Url>,
    /// HTTP status code, 0 for opaque and error responses
    pub status: u16,
    /// Response headers, repeated names and non-UTF-8 values included
    #[serde(with = "http_serde::header_map")]
    pub headers: HeaderMap,
    /// Response body
    pub body: Bytes,
    #[serde(rename = "type")]
    pub kind: ResponseType,
}

impl Response {
    pub fn new(status: u16, body: impl Into<Bytes>) -> Self {
        Self {
            url: None,
            status,
            headers: HeaderMap::new(),
            body: body.into(),
            kind: ResponseType::Basic,
        }
    }

    /// A filtered cross-origin response: status 0, no headers, empty body.
    pub fn opaque() -> Self {
        Self {
            url: None,
            status: 0,
            headers: HeaderMap::new(),
            body: Bytes::new(),
            kind: ResponseType::Opaque,
        }
    }

    pub fn with_url(mut self, url: Url) -> Self {
        self.url = Some(url);
        self
    }

    /// Append a header value, keeping earlier values under the same name.
    pub fn with_header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.append(name, value);
        self
    }

    pub fn with_kind(mut self, kind: ResponseType) -> Self {
        self.kind = kind;
        self
    }

    /// True for statuses in the 200..=299 range.
    pub fn ok(&self) -> bool {
        (200..=299).contains(&self.status)
    }

    pub fn is_opaque(&self) -> bool {
        self.kind == ResponseType::Opaque
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::header::{CONTENT_TYPE, SET_COOKIE};

    #[test]
    fn test_ok_range() {
        assert!(Response::new(200, "body").ok());
        assert!(Response::new(204, "").ok());
        assert!(Response::new(299, "").ok());
        assert!(!Response::new(199, "").ok());
        assert!(!Response::new(304, "").ok());
        assert!(!Response::new(404, "not found").ok());
        assert!(!Response::new(503, "").ok());
    }

    #[test]
    fn test_opaque_response_hides_everything() {
        let response = Response::opaque();

        assert!(response.is_opaque());
        assert!(!response.ok());
        assert_eq!(response.status, 0);
        assert!(response.headers.is_empty());
        assert!(response.body.is_empty());
        assert!(response.url.is_none());
    }

    #[test]
    fn test_builder_helpers() {
        let url = Url::parse("https://cdn.example.org/lib.js").unwrap();
        let response = Response::new(200, "console.log(1)")
            .with_url(url.clone())
            .with_header(
                CONTENT_TYPE,
                HeaderValue::from_static("application/javascript"),
            )
            .with_kind(ResponseType::Cors);

        assert_eq!(response.url, Some(url));
        assert_eq!(
            response.headers.get(CONTENT_TYPE).unwrap(),
            "application/javascript"
        );
        assert_eq!(response.kind, ResponseType::Cors);
        assert!(!response.is_opaque());
    }

    #[test]
    fn test_repeated_headers_are_kept() {
        let response = Response::new(200, "")
            .with_header(SET_COOKIE, HeaderValue::from_static("a=1"))
            .with_header(SET_COOKIE, HeaderValue::from_static("b=2"));

        let cookies: Vec<_> = response.headers.get_all(SET_COOKIE).iter().collect();
        assert_eq!(cookies, vec!["a=1", "b=2"]);
    }
}
