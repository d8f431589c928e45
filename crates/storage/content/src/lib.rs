//! Data-driven storage content and loaders.
//!
//! This crate reads the files a storage runtime is configured from:
//! - Global storage configuration (TOML)
//! - Big craftable, building and location data with custom fields (RON)
//! - Translation tables for fixed text keys (RON)
//!
//! Content feeds runtime oracles and never appears in world state.

#[cfg(feature = "loaders")]
pub mod loaders;

#[cfg(feature = "loaders")]
pub use loaders::{
    ConfigLoader, ContentFactory, DataCatalog, DataLoader, LoadResult, TranslationLoader,
    Translations,
};
