//! Paginator configuration

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::errors::{ConfigError, ConfigResult};
use crate::labels::CustomLabels;

/// Limit applied when a call supplies none, or an invalid one
pub const DEFAULT_LIMIT: u64 = 10;

/// Paginator configuration.
///
/// Every field has a default, so `{}` is a complete config file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaginatorConfig {
    /// Limit used when the caller's is absent or invalid (default: 10)
    #[serde(default = "default_limit")]
    pub default_limit: u64,

    /// Caller limits above this are clamped down to it (default: none)
    #[serde(default)]
    pub max_limit: Option<u64>,

    /// Fetch size used when pagination is disabled (default: unbounded)
    #[serde(default)]
    pub unpaginated_cap: Option<u64>,

    /// Labels applied when a call supplies none (default: canonical)
    #[serde(default)]
    pub custom_labels: CustomLabels,
}

fn default_limit() -> u64 {
    DEFAULT_LIMIT
}

impl Default for PaginatorConfig {
    fn default() -> Self {
        Self {
            default_limit: default_limit(),
            max_limit: None,
            unpaginated_cap: None,
            custom_labels: CustomLabels::default(),
        }
    }
}

impl PaginatorConfig {
    /// Load and validate configuration from a JSON file
    pub fn load(path: &Path) -> ConfigResult<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }

    /// Parse and validate configuration from JSON text
    pub fn from_json_str(content: &str) -> ConfigResult<Self> {
        let config: PaginatorConfig = serde_json::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate value ranges
    pub fn validate(&self) -> ConfigResult<()> {
        if self.default_limit == 0 {
            return Err(ConfigError::invalid("default_limit must be > 0"));
        }

        match self.max_limit {
            Some(0) => return Err(ConfigError::invalid("max_limit must be > 0")),
            Some(max) if max < self.default_limit => {
                return Err(ConfigError::invalid(format!(
                    "max_limit ({}) is below default_limit ({})",
                    max, self.default_limit
                )));
            }
            _ => {}
        }

        if self.unpaginated_cap == Some(0) {
            return Err(ConfigError::invalid("unpaginated_cap must be > 0"));
        }

        Ok(())
    }

    /// Set the default limit
    pub fn with_default_limit(mut self, limit: u64) -> Self {
        self.default_limit = limit;
        self
    }

    /// Set the maximum limit
    pub fn with_max_limit(mut self, max: u64) -> Self {
        self.max_limit = Some(max);
        self
    }

    /// Cap the fetch size of unpaginated calls
    pub fn with_unpaginated_cap(mut self, cap: u64) -> Self {
        self.unpaginated_cap = Some(cap);
        self
    }

    /// Set the fallback labels
    pub fn with_custom_labels(mut self, labels: CustomLabels) -> Self {
        self.custom_labels = labels;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page::PageField;

    #[test]
    fn test_default_config() {
        let config = PaginatorConfig::default();
        assert_eq!(config.default_limit, 10);
        assert_eq!(config.max_limit, None);
        assert_eq!(config.unpaginated_cap, None);
        assert!(config.custom_labels.is_identity());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_json_is_default() {
        let config = PaginatorConfig::from_json_str("{}").unwrap();
        assert_eq!(config, PaginatorConfig::default());
    }

    #[test]
    fn test_parse_full_config() {
        let config = PaginatorConfig::from_json_str(
            r#"{
                "default_limit": 25,
                "max_limit": 100,
                "unpaginated_cap": 500,
                "custom_labels": {"docs": "items", "meta": "paging"}
            }"#,
        )
        .unwrap();

        assert_eq!(config.default_limit, 25);
        assert_eq!(config.max_limit, Some(100));
        assert_eq!(config.unpaginated_cap, Some(500));
        assert_eq!(config.custom_labels.output_key(PageField::Docs), Some("items"));
        assert_eq!(config.custom_labels.meta_key(), Some("paging"));
    }

    #[test]
    fn test_zero_default_limit_rejected() {
        let err = PaginatorConfig::from_json_str(r#"{"default_limit": 0}"#).unwrap_err();
        assert_eq!(err.code(), "DOCPAGE_CONFIG_INVALID");
    }

    #[test]
    fn test_max_below_default_rejected() {
        let config = PaginatorConfig::default().with_max_limit(5);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_zero_cap_rejected() {
        let config = PaginatorConfig::default().with_unpaginated_cap(0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_malformed_json() {
        let err = PaginatorConfig::from_json_str("{default_limit").unwrap_err();
        assert_eq!(err.code(), "DOCPAGE_CONFIG_PARSE");
    }
}
