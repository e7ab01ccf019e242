//! UI manager configuration.
//!
//! Defaults match the bridge protocol: root tags start at 1 and advance by 10,
//! and event names carry a 3 character source prefix (`top`). A TOML document
//! may override any subset of the keys.
//!
//! ```toml
//! first_root_tag = 1
//! root_tag_stride = 10
//! event_prefix_len = 3
//! ```

use serde::Deserialize;
use thiserror::Error;

use crate::types::Tag;

/// Errors loading a [`UiManagerConfig`].
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConfigError {
    #[error("failed to parse UI manager config: {0}")]
    Parse(String),

    #[error("invalid UI manager config: {0}")]
    Validation(String),
}

impl From<toml::de::Error> for ConfigError {
    fn from(err: toml::de::Error) -> Self {
        Self::Parse(err.to_string())
    }
}

/// Tunables for a [`UiManager`](crate::manager::UiManager).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct UiManagerConfig {
    /// First tag handed out by `allocateRootTag`.
    pub first_root_tag: Tag,
    /// Distance between consecutive root tags. The tags in between are
    /// reserved for that root's descendants.
    pub root_tag_stride: Tag,
    /// Length of the source prefix replaced by `on` when exporting event
    /// registration names (`topChange` -> `onChange`).
    pub event_prefix_len: usize,
}

impl Default for UiManagerConfig {
    fn default() -> Self {
        Self {
            first_root_tag: 1,
            root_tag_stride: 10,
            event_prefix_len: 3,
        }
    }
}

impl UiManagerConfig {
    /// Parse and validate a TOML document. Missing keys keep their defaults.
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Check invariants the manager relies on.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.root_tag_stride == 0 {
            return Err(ConfigError::Validation(
                "root_tag_stride must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = UiManagerConfig::default();
        assert_eq!(config.first_root_tag, 1);
        assert_eq!(config.root_tag_stride, 10);
        assert_eq!(config.event_prefix_len, 3);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = UiManagerConfig::from_toml_str("root_tag_stride = 100\n").unwrap();
        assert_eq!(config.first_root_tag, 1);
        assert_eq!(config.root_tag_stride, 100);
    }

    #[test]
    fn test_zero_stride_rejected() {
        let err = UiManagerConfig::from_toml_str("root_tag_stride = 0").unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
    }

    #[test]
    fn test_unknown_key_rejected() {
        let err = UiManagerConfig::from_toml_str("root_stride = 5").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }
}
