use cachefirst_cache::{Request, Response};
use tracing::warn;

/// Side channel told about network responses that could not be cached.
pub trait DiagnosticSink: Send + Sync {
    fn uncacheable(&self, request: &Request, response: &Response);
}

/// Default sink, reports through `tracing` at warn level.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn uncacheable(&self, request: &Request, response: &Response) {
        warn!(
            method = %request.method(),
            url = %request.url(),
            status = response.status,
            kind = ?response.kind,
            "Unable to add to cache"
        );
    }
}
