use std::{fs, path};

#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("YAML parsing error: {0}")]
    YamlParse(#[from] serde_yaml::Error),
    #[error("Missing config field: {0}")]
    MissingField(&'static str),
    #[error("Invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },
}

pub trait Configurable {
    fn config(&self) -> &serde_yaml::Value;

    // read configuration from yaml config
    fn load_config(
        config_file_path: impl AsRef<path::Path>,
    ) -> Result<serde_yaml::Value, ConfigError> {
        let path = config_file_path.as_ref();
        let content: String = fs::read_to_string(path)?;
        let config: serde_yaml::Value = serde_yaml::from_str(&content)?;
        tracing::debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Extract Value from config using dot notation i.e. "cache.name"
    fn get_config_value(&self, key: &str) -> Option<&serde_yaml::Value> {
        let keys: Vec<&str> = key.split('.').collect();
        get_value_recursive(self.config(), &keys)
    }
}

fn get_value_recursive<'a>(
    config: &'a serde_yaml::Value,
    keys: &[&str],
) -> Option<&'a serde_yaml::Value> {
    let (key, remaining_keys) = keys.split_first()?;
    if key.is_empty() {
        return None;
    }

    match config {
        serde_yaml::Value::Mapping(map) => {
            let value = map.get(serde_yaml::Value::String(key.to_string()))?;
            if remaining_keys.is_empty() {
                Some(value)
            } else {
                get_value_recursive(value, remaining_keys)
            }
        }
        _ => None,
    }
}

/// Last segment of a dotted config path, the key inside its section.
fn section_key(path: &str) -> &str {
    path.rsplit('.').next().unwrap_or(path)
}

/// Read an optional boolean field, failing if present with another type.
/// `field` is the full dotted path (`cache.cache_opaque`) and is what errors
/// report; `section` is the value at its parent.
pub(crate) fn optional_bool(
    section: &serde_yaml::Value,
    field: &'static str,
) -> Result<Option<bool>, ConfigError> {
    match section.get(section_key(field)) {
        None | Some(serde_yaml::Value::Null) => Ok(None),
        Some(value) => value.as_bool().map(Some).ok_or(ConfigError::InvalidValue {
            field,
            reason: "expected a boolean".to_string(),
        }),
    }
}

/// Read an optional string field, failing if present with another type.
pub(crate) fn optional_str<'a>(
    section: &'a serde_yaml::Value,
    field: &'static str,
) -> Result<Option<&'a str>, ConfigError> {
    match section.get(section_key(field)) {
        None | Some(serde_yaml::Value::Null) => Ok(None),
        Some(value) => value.as_str().map(Some).ok_or(ConfigError::InvalidValue {
            field,
            reason: "expected a string".to_string(),
        }),
    }
}
