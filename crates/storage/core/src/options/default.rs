use super::{StorageOptionValues, StorageOptions};
use crate::env::{TextOracle, keys};

/// Global root layer, built from configuration.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DefaultStorageOptions {
    values: StorageOptionValues,
}

impl DefaultStorageOptions {
    pub fn new(values: StorageOptionValues) -> Self {
        Self { values }
    }
}

impl StorageOptions for DefaultStorageOptions {
    fn own(&self) -> &StorageOptionValues {
        &self.values
    }

    fn display_name(&self, text: &dyn TextOracle) -> String {
        if self.values.storage_name.is_empty() {
            text.translate_or_key(keys::DEFAULT_STORAGE_NAME)
        } else {
            self.values.storage_name.clone()
        }
    }

    fn description(&self, text: &dyn TextOracle) -> String {
        text.translate_or_key(keys::DEFAULT_STORAGE_DESCRIPTION)
    }
}
