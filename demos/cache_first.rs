//! Cache-first demo: fetch the same URL twice through the interceptor and
//! watch the second call come from the cache.
//!
//! Usage: cargo run --example cache_first -- [URL] [CONFIG.yml]

use std::{env, sync::Arc, time::Duration};

use cachefirst::{
    CacheFirst, InMemoryCacheStorage, InterceptStackOptions, Request, Served,
    build_intercept_stack,
    config::{Configurable, serde_yaml},
    tower::ServiceExt,
    tracing, tracing_subscriber,
};

const DEFAULT_CONFIG: &str = r#"
cache:
  name: myCache
  cache_opaque: true
http:
  timeout: 30
  connect_timeout: 10
"#;

struct DemoApp {
    config: serde_yaml::Value,
}

impl Configurable for DemoApp {
    fn config(&self) -> &serde_yaml::Value {
        &self.config
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let mut args = env::args().skip(1);
    let url = args.next().unwrap_or_else(|| "https://httpbin.org/get".to_string());
    let config = match args.next() {
        Some(path) => DemoApp::load_config(path)?,
        None => serde_yaml::from_str(DEFAULT_CONFIG)?,
    };
    let app = DemoApp { config };

    let storage = Arc::new(InMemoryCacheStorage::new());
    let interceptor = CacheFirst::from_config(app.config(), storage)?;
    tracing::info!(
        cache = interceptor.cache_name(),
        timeout = ?app.get_config_value("http.timeout"),
        "interceptor ready"
    );

    let service = build_intercept_stack(
        interceptor,
        InterceptStackOptions {
            timeout: Some(Duration::from_secs(60)),
            concurrency_limit: Some(8),
        },
    );

    for attempt in 1..=2 {
        let request = Request::parse(&url)?;
        let served = service
            .clone()
            .oneshot(request)
            .await
            .map_err(|e| anyhow::anyhow!(e))?;

        match &served {
            Served::CacheHit(response) => tracing::info!(
                attempt,
                status = response.status,
                bytes = response.body.len(),
                "served from cache"
            ),
            Served::Network(response) => tracing::info!(
                attempt,
                status = response.status,
                bytes = response.body.len(),
                "served from network"
            ),
            Served::Empty => tracing::warn!(attempt, "no response"),
        }
    }

    Ok(())
}
