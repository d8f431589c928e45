use std::collections::BTreeMap;

use super::{StorageOptionValues, StorageOptions};
use crate::env::TextOracle;

/// Standalone layer read from a raw string map (data custom fields).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CustomFieldsStorageOptions {
    values: StorageOptionValues,
}

impl CustomFieldsStorageOptions {
    /// Parses `storage-options/*` keys; a missing map yields an empty layer.
    pub fn new(custom_fields: Option<&BTreeMap<String, String>>) -> Self {
        let values = custom_fields
            .map(|fields| {
                StorageOptionValues::from_fields(fields.iter().map(|(k, v)| (k.as_str(), v.as_str())))
            })
            .unwrap_or_default();
        Self { values }
    }

    pub fn into_values(self) -> StorageOptionValues {
        self.values
    }
}

impl StorageOptions for CustomFieldsStorageOptions {
    fn own(&self) -> &StorageOptionValues {
        &self.values
    }

    fn display_name(&self, _text: &dyn TextOracle) -> String {
        self.values.storage_name.clone()
    }

    fn description(&self, _text: &dyn TextOracle) -> String {
        String::new()
    }
}
