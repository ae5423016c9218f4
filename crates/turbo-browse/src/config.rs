//! Browse configuration.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use turbo_catalog::{FetchPolicy, RetryPolicy, TimeoutConfig};
use turbo_observability::LoggingConfig;

use crate::error::BrowseError;

/// Largest page size the service accepts.
pub const MAX_PAGE_SIZE: u32 = 100;

/// Configuration file contents. Every field has a default.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BrowseConfig {
    /// Catalog service settings.
    #[serde(default)]
    pub catalog: CatalogConfig,

    /// Debounce delays.
    #[serde(default)]
    pub debounce: DebounceConfig,

    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl BrowseConfig {
    /// Load config from a TOML or JSON file (chosen by extension).
    pub fn load(path: impl AsRef<Path>) -> Result<Self, BrowseError> {
        let path = path.as_ref();
        let display = path.display().to_string();
        let content = std::fs::read_to_string(path).map_err(|source| BrowseError::ConfigRead {
            path: display.clone(),
            source,
        })?;

        let config: Self = if path.extension().is_some_and(|e| e == "json") {
            serde_json::from_str(&content).map_err(|e| BrowseError::ConfigParse {
                path: display.clone(),
                message: e.to_string(),
            })?
        } else {
            toml::from_str(&content).map_err(|e| BrowseError::ConfigParse {
                path: display.clone(),
                message: e.to_string(),
            })?
        };

        config.validate()?;
        Ok(config)
    }

    /// Check values that serde cannot.
    pub fn validate(&self) -> Result<(), BrowseError> {
        if self.catalog.base_url.trim().is_empty() {
            return Err(BrowseError::InvalidConfig("catalog.base_url is empty".into()));
        }
        if self.catalog.timeout_ms == 0 {
            return Err(BrowseError::InvalidConfig("catalog.timeout_ms must be positive".into()));
        }
        Ok(())
    }
}

/// Catalog service settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Service root, e.g. `https://shop.example/api`.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Products per page.
    #[serde(default = "default_page_size")]
    pub page_size: u32,

    /// Per-attempt time budget.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// Retries after the first attempt.
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
}

fn default_base_url() -> String {
    "http://localhost:3000/api".to_string()
}

fn default_page_size() -> u32 {
    12
}

fn default_timeout_ms() -> u64 {
    5000
}

fn default_max_retries() -> u32 {
    1
}

impl CatalogConfig {
    /// Page size clamped to `1..=MAX_PAGE_SIZE`.
    pub fn page_size(&self) -> u32 {
        self.page_size.clamp(1, MAX_PAGE_SIZE)
    }

    /// Fetch policy applied to every catalog endpoint.
    pub fn fetch_policy(&self) -> FetchPolicy {
        FetchPolicy::new(
            TimeoutConfig::from_total(Duration::from_millis(self.timeout_ms)),
            RetryPolicy::new(self.max_retries),
        )
    }
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            page_size: default_page_size(),
            timeout_ms: default_timeout_ms(),
            max_retries: default_max_retries(),
        }
    }
}

/// Debounce delays in milliseconds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DebounceConfig {
    /// Delay before reflecting state into the URL.
    #[serde(default = "default_url_ms")]
    pub url_ms: u64,

    /// Delay before a free-text search triggers a fetch.
    #[serde(default = "default_search_ms")]
    pub search_ms: u64,
}

fn default_url_ms() -> u64 {
    500
}

fn default_search_ms() -> u64 {
    300
}

impl DebounceConfig {
    pub fn url_delay(&self) -> Duration {
        Duration::from_millis(self.url_ms)
    }

    pub fn search_delay(&self) -> Duration {
        Duration::from_millis(self.search_ms)
    }
}

impl Default for DebounceConfig {
    fn default() -> Self {
        Self {
            url_ms: default_url_ms(),
            search_ms: default_search_ms(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;
    use turbo_observability::LogFormat;

    #[test]
    fn test_defaults() {
        let config = BrowseConfig::default();
        assert_eq!(config.catalog.page_size(), 12);
        assert_eq!(config.debounce.url_delay(), Duration::from_millis(500));
        assert_eq!(config.debounce.search_delay(), Duration::from_millis(300));
        assert_eq!(config.catalog.fetch_policy().retry.max_attempts, 1);
    }

    #[test]
    fn test_load_partial_toml() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            r#"
[catalog]
base_url = "https://shop.example/api"
page_size = 500

[logging]
format = "json"
"#
        )
        .unwrap();

        let config = BrowseConfig::load(file.path()).unwrap();
        assert_eq!(config.catalog.base_url, "https://shop.example/api");
        assert_eq!(config.catalog.page_size(), MAX_PAGE_SIZE);
        assert_eq!(config.catalog.timeout_ms, 5000);
        assert_eq!(config.debounce, DebounceConfig::default());
        assert_eq!(config.logging.format, LogFormat::Json);
    }

    #[test]
    fn test_load_json() {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        write!(file, r#"{{"debounce": {{"search_ms": 150}}}}"#).unwrap();

        let config = BrowseConfig::load(file.path()).unwrap();
        assert_eq!(config.debounce.search_ms, 150);
        assert_eq!(config.debounce.url_ms, 500);
    }

    #[test]
    fn test_load_errors() {
        assert!(matches!(
            BrowseConfig::load("/definitely/not/here.toml"),
            Err(BrowseError::ConfigRead { .. })
        ));

        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        write!(file, "[catalog\nbase_url = 1").unwrap();
        assert!(matches!(
            BrowseConfig::load(file.path()),
            Err(BrowseError::ConfigParse { .. })
        ));
    }

    #[test]
    fn test_validate() {
        let mut config = BrowseConfig::default();
        config.catalog.timeout_ms = 0;
        assert!(matches!(config.validate(), Err(BrowseError::InvalidConfig(_))));
    }
}
