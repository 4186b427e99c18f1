//! Cache policy configuration, read from the `cache` section.
use crate::config::{ConfigError, optional_bool, optional_str};

pub const DEFAULT_CACHE_NAME: &str = "myCache";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PolicyParams {
    /// Name of the cache store requests are served from
    pub cache_name: String,
    /// Cache opaque (cross-origin, unreadable) network responses.
    /// When false they are reported as uncacheable instead.
    pub cache_opaque: bool,
}

impl Default for PolicyParams {
    fn default() -> Self {
        Self {
            cache_name: DEFAULT_CACHE_NAME.to_string(),
            cache_opaque: true,
        }
    }
}

impl PolicyParams {
    /// ```yaml
    /// cache:
    ///     name: myCache
    ///     cache_opaque: true
    /// ```
    /// Every field is optional; a missing section yields the defaults.
    pub fn from_config(cache_config: &serde_yaml::Value) -> Result<Self, ConfigError> {
        let defaults = Self::default();
        let cache_name = match optional_str(cache_config, "cache.name")? {
            Some("") => {
                return Err(ConfigError::InvalidValue {
                    field: "cache.name",
                    reason: "cache name must not be empty".to_string(),
                });
            }
            Some(name) => name.to_string(),
            None => defaults.cache_name,
        };
        let cache_opaque = optional_bool(cache_config, "cache.cache_opaque")?
            .unwrap_or(defaults.cache_opaque);

        Ok(Self {
            cache_name,
            cache_opaque,
        })
    }
}
