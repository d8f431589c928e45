use std::fmt;
use std::rc::Rc;

use super::{DefaultProvider, StorageOptionValues, StorageOptions};
use crate::env::TextOracle;

/// Layer with its own values and a required provider for the next layer.
#[derive(Clone)]
pub struct ChildStorageOptions {
    get_default: DefaultProvider,
    values: StorageOptionValues,
}

impl ChildStorageOptions {
    pub fn new(get_default: DefaultProvider, values: StorageOptionValues) -> Self {
        Self {
            get_default,
            values,
        }
    }

    pub fn get_default(&self) -> Rc<dyn StorageOptions> {
        (self.get_default)()
    }

    pub fn values_mut(&mut self) -> &mut StorageOptionValues {
        &mut self.values
    }
}

impl fmt::Debug for ChildStorageOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChildStorageOptions")
            .field("values", &self.values)
            .finish_non_exhaustive()
    }
}

impl StorageOptions for ChildStorageOptions {
    fn own(&self) -> &StorageOptionValues {
        &self.values
    }

    fn fallback(&self) -> Option<Rc<dyn StorageOptions>> {
        Some(self.get_default())
    }

    fn display_name(&self, text: &dyn TextOracle) -> String {
        if self.values.storage_name.is_empty() {
            self.get_default().display_name(text)
        } else {
            self.values.storage_name.clone()
        }
    }

    fn description(&self, text: &dyn TextOracle) -> String {
        self.get_default().description(text)
    }
}
