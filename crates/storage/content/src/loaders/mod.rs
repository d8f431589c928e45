//! Content loaders for reading storage data from files.
//!
//! Each loader turns one RON/TOML file into a storage-core type or a catalog
//! the runtime oracles serve lookups from.

pub mod config;
pub mod data;
pub mod factory;
pub mod translations;

pub use config::ConfigLoader;
pub use data::{DataCatalog, DataLoader};
pub use factory::ContentFactory;
pub use translations::{TranslationLoader, Translations};

use std::path::Path;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read file {}: {}", path.display(), e))
}
