pub mod config;
pub mod http;
pub mod policy;

pub use config::{ConfigError, Configurable};
pub use http::HttpClientParams;
pub use policy::PolicyParams;

// re-export
pub use serde_yaml;
