//! Content factory for building oracles from data files.

use std::path::{Path, PathBuf};

use storage_core::StorageConfig;

use crate::loaders::{
    ConfigLoader, DataCatalog, DataLoader, LoadResult, TranslationLoader, Translations,
};

/// Content factory that loads all storage content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── config.toml
/// ├── data.ron
/// ├── translations.ron
/// └── scenarios/
///     └── farm.ron
/// ```
///
/// Every file is optional: a missing file yields the shipped default, while a
/// file that exists but fails to parse is an error.
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    pub const CONFIG_FILE: &'static str = "config.toml";
    pub const DATA_FILE: &'static str = "data.ron";
    pub const TRANSLATIONS_FILE: &'static str = "translations.ron";
    pub const SCENARIO_DIR: &'static str = "scenarios";

    /// Creates a new content factory pointing to a data directory.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Load storage configuration from `config.toml`.
    pub fn load_config(&self) -> LoadResult<StorageConfig> {
        let path = self.data_dir.join(Self::CONFIG_FILE);
        if !path.exists() {
            tracing::info!(path = %path.display(), "no config file, using shipped defaults");
            return Ok(StorageConfig::default());
        }
        ConfigLoader::load(&path)
    }

    /// Load the data catalog from `data.ron`.
    pub fn load_data(&self) -> LoadResult<DataCatalog> {
        let path = self.data_dir.join(Self::DATA_FILE);
        if !path.exists() {
            tracing::info!(path = %path.display(), "no data catalog, every type uses global options");
            return Ok(DataCatalog::default());
        }
        DataLoader::load(&path)
    }

    /// Load translations from `translations.ron`.
    pub fn load_translations(&self) -> LoadResult<Translations> {
        let path = self.data_dir.join(Self::TRANSLATIONS_FILE);
        if !path.exists() {
            return Ok(Translations::default());
        }
        TranslationLoader::load(&path)
    }

    /// Path of `scenarios/{name}.ron`.
    pub fn scenario_path(&self, name: &str) -> PathBuf {
        self.data_dir
            .join(Self::SCENARIO_DIR)
            .join(format!("{}.ron", name))
    }

    /// Returns the data directory path.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_factory_paths() {
        let factory = ContentFactory::new("/tmp/data");
        assert_eq!(factory.data_dir(), Path::new("/tmp/data"));
        assert_eq!(
            factory.scenario_path("farm"),
            Path::new("/tmp/data/scenarios/farm.ron")
        );
    }

    #[test]
    fn empty_directory_loads_defaults() {
        let dir = tempfile::TempDir::new().unwrap();
        let factory = ContentFactory::new(dir.path());

        assert_eq!(factory.load_config().unwrap(), StorageConfig::default());
        assert!(factory.load_data().unwrap().is_empty());
        assert!(factory.load_translations().unwrap().is_empty());
    }

    #[test]
    fn malformed_file_is_an_error() {
        let dir = tempfile::TempDir::new().unwrap();
        std::fs::write(dir.path().join(ContentFactory::DATA_FILE), "(big_craftables: [").unwrap();
        let factory = ContentFactory::new(dir.path());

        assert!(factory.load_data().is_err());
    }
}
