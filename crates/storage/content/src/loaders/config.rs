//! Storage configuration loader.

use std::path::Path;

use storage_core::StorageConfig;

use crate::loaders::{LoadResult, read_file};

/// Loader for [`StorageConfig`] from TOML files.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load config data from a TOML file.
    ///
    /// Omitted keys keep their shipped defaults; a partial `[default_options]`
    /// table leaves the remaining fields at their inherit sentinel.
    pub fn load(path: &Path) -> LoadResult<StorageConfig> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<StorageConfig> {
        let config: StorageConfig = toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse config TOML: {}", e))?;

        Ok(config)
    }
}
