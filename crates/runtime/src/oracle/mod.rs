//! Runtime implementations of the storage-core oracle traits.
//!
//! Data and text oracles serve lookups from content loaded by
//! `storage-content`; the menu oracle records requests for whichever front end
//! drains it. [`OracleManager`] bundles them and hands out [`StorageEnv`]
//! snapshots.
mod data;
mod menu;
mod text;

use std::sync::Arc;

use storage_content::{DataCatalog, Translations};
use storage_core::{Env, StorageEnv};

pub use data::DataOracleImpl;
pub use menu::RecordingMenuOracle;
pub use text::TextOracleImpl;

/// Manages all oracle implementations and provides unified access
#[derive(Clone)]
pub struct OracleManager {
    pub(crate) data: Arc<DataOracleImpl>,
    pub(crate) text: Arc<TextOracleImpl>,
    pub(crate) menu: Arc<RecordingMenuOracle>,
}

impl OracleManager {
    pub fn new(
        data: Arc<DataOracleImpl>,
        text: Arc<TextOracleImpl>,
        menu: Arc<RecordingMenuOracle>,
    ) -> Self {
        Self { data, text, menu }
    }

    /// Builds every oracle from loaded content.
    pub fn from_content(catalog: DataCatalog, translations: Translations) -> Self {
        Self::new(
            Arc::new(DataOracleImpl::new(catalog)),
            Arc::new(TextOracleImpl::new(translations)),
            Arc::new(RecordingMenuOracle::new()),
        )
    }

    /// Converts oracle manager into a StorageEnv for storage-core
    pub fn as_storage_env(&self) -> StorageEnv<'_> {
        Env::with_all(self.data.as_ref(), self.text.as_ref(), self.menu.as_ref())
            .into_storage_env()
    }

    pub fn menu(&self) -> &RecordingMenuOracle {
        &self.menu
    }
}

impl Default for OracleManager {
    fn default() -> Self {
        Self::from_content(DataCatalog::default(), Translations::default())
    }
}
