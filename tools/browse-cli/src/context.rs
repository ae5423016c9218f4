//! CLI execution context.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context as _, Result};
use turbo_browse::BrowseConfig;
use turbo_catalog::{CatalogService, HttpCatalogClient};
use turbo_observability::{init_logging, LogLevel, LoggingConfig};

use crate::output::Output;

/// Config file names searched for, nearest directory first.
pub const CONFIG_NAMES: [&str; 3] = ["browse.toml", ".browse.toml", "browse.json"];

/// Execution context for CLI commands.
pub struct Context {
    /// Engine configuration.
    pub config: BrowseConfig,
    /// Where the config came from, if not defaults.
    pub config_path: Option<PathBuf>,
    /// Output handler.
    pub output: Output,
}

impl Context {
    /// Load context from an explicit config file or the nearest one found.
    pub fn load(config_path: Option<&str>, output: Output) -> Result<Self> {
        let (config, config_path) = if let Some(path) = config_path {
            let config = BrowseConfig::load(path)
                .with_context(|| format!("Failed to load config from {}", path))?;
            (config, Some(PathBuf::from(path)))
        } else {
            let cwd = std::env::current_dir().context("Failed to get current directory")?;
            match find_config(&cwd) {
                Some(path) => {
                    let config = BrowseConfig::load(&path)
                        .with_context(|| format!("Failed to load config from {}", path.display()))?;
                    (config, Some(path))
                }
                None => (BrowseConfig::default(), None),
            }
        };

        Ok(Self {
            config,
            config_path,
            output,
        })
    }

    /// Install the log subscriber. `--verbose` raises the level to debug.
    pub fn init_logging(&self) {
        let mut logging: LoggingConfig = self.config.logging;
        if self.output.is_verbose() && logging.level > LogLevel::Debug {
            logging.level = LogLevel::Debug;
        }
        if let Err(e) = init_logging(logging) {
            self.output.warn(&e.to_string());
        }
        if let Some(path) = &self.config_path {
            self.output.debug(&format!("Using config {}", path.display()));
        }
    }

    /// Catalog client built from the config.
    pub fn catalog(&self) -> Result<Arc<dyn CatalogService>> {
        let client = HttpCatalogClient::new(&self.config.catalog.base_url)
            .and_then(|c| c.with_policy(self.config.catalog.fetch_policy()))
            .with_context(|| format!("Cannot create catalog client for {}", self.config.catalog.base_url))?;
        Ok(Arc::new(client))
    }
}

/// Find the nearest config file walking up from `start`.
pub fn find_config(start: &Path) -> Option<PathBuf> {
    let mut current = start.to_path_buf();
    loop {
        for name in &CONFIG_NAMES {
            let candidate = current.join(name);
            if candidate.is_file() {
                return Some(candidate);
            }
        }

        if !current.pop() {
            return None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_config_walks_up() {
        let root = tempfile::tempdir().unwrap();
        let nested = root.path().join("a").join("b");
        std::fs::create_dir_all(&nested).unwrap();
        std::fs::write(root.path().join(".browse.toml"), "").unwrap();

        let found = find_config(&nested).unwrap();
        assert_eq!(found, root.path().join(".browse.toml"));
    }

    #[test]
    fn test_nearest_config_wins() {
        let root = tempfile::tempdir().unwrap();
        let nested = root.path().join("shop");
        std::fs::create_dir_all(&nested).unwrap();
        std::fs::write(root.path().join("browse.toml"), "").unwrap();
        std::fs::write(nested.join("browse.json"), "{}").unwrap();

        assert_eq!(find_config(&nested), Some(nested.join("browse.json")));
    }

    #[test]
    fn test_explicit_config_loads() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("custom.toml");
        std::fs::write(&path, "[catalog]\npage_size = 24\n").unwrap();

        let ctx = Context::load(path.to_str(), Output::new(false, true)).unwrap();
        assert_eq!(ctx.config.catalog.page_size(), 24);
        assert_eq!(ctx.config_path, Some(path));
    }

    #[test]
    fn test_catalog_rejects_bad_url() {
        let mut ctx = Context {
            config: BrowseConfig::default(),
            config_path: None,
            output: Output::new(false, true),
        };
        ctx.config.catalog.base_url = "catalog.local".into();
        assert!(ctx.catalog().is_err());
    }
}
