//! Per-type layers backed by game data records.
//!
//! Each wraps a [`ChildStorageOptions`] whose own values come from the
//! record's custom fields, and overrides the display text.

use std::rc::Rc;

use super::{
    ChildStorageOptions, CustomFieldsStorageOptions, DefaultProvider, StorageOptionValues,
    StorageOptions,
};
use crate::env::{BigCraftableData, BuildingData, LocationData, TextOracle, keys};

#[derive(Clone, Debug)]
pub struct BigCraftableStorageOptions {
    base: ChildStorageOptions,
    data: BigCraftableData,
}

impl BigCraftableStorageOptions {
    pub fn new(get_default: DefaultProvider, data: BigCraftableData) -> Self {
        let values = CustomFieldsStorageOptions::new(Some(&data.custom_fields)).into_values();
        Self {
            base: ChildStorageOptions::new(get_default, values),
            data,
        }
    }

    pub fn data(&self) -> &BigCraftableData {
        &self.data
    }
}

impl StorageOptions for BigCraftableStorageOptions {
    fn own(&self) -> &StorageOptionValues {
        self.base.own()
    }

    fn fallback(&self) -> Option<Rc<dyn StorageOptions>> {
        self.base.fallback()
    }

    fn display_name(&self, text: &dyn TextOracle) -> String {
        text.parse_tokens(&self.data.display_name)
    }

    fn description(&self, text: &dyn TextOracle) -> String {
        text.parse_tokens(&self.data.description)
    }
}

#[derive(Clone, Debug)]
pub struct BuildingStorageOptions {
    base: ChildStorageOptions,
    data: BuildingData,
}

impl BuildingStorageOptions {
    pub fn new(get_default: DefaultProvider, data: BuildingData) -> Self {
        let values = CustomFieldsStorageOptions::new(Some(&data.custom_fields)).into_values();
        Self {
            base: ChildStorageOptions::new(get_default, values),
            data,
        }
    }

    pub fn data(&self) -> &BuildingData {
        &self.data
    }
}

impl StorageOptions for BuildingStorageOptions {
    fn own(&self) -> &StorageOptionValues {
        self.base.own()
    }

    fn fallback(&self) -> Option<Rc<dyn StorageOptions>> {
        self.base.fallback()
    }

    fn display_name(&self, text: &dyn TextOracle) -> String {
        text.parse_tokens(&self.data.name)
    }

    fn description(&self, text: &dyn TextOracle) -> String {
        text.parse_tokens(&self.data.description)
    }
}

/// Location-bound storage. Location records carry no text, so display text
/// comes from fixed translation keys.
#[derive(Clone, Debug)]
pub struct LocationStorageOptions {
    base: ChildStorageOptions,
    data: Option<LocationData>,
}

impl LocationStorageOptions {
    pub fn new(get_default: DefaultProvider, data: Option<LocationData>) -> Self {
        let values =
            CustomFieldsStorageOptions::new(data.as_ref().map(|d| &d.custom_fields)).into_values();
        Self {
            base: ChildStorageOptions::new(get_default, values),
            data,
        }
    }

    pub fn data(&self) -> Option<&LocationData> {
        self.data.as_ref()
    }
}

impl StorageOptions for LocationStorageOptions {
    fn own(&self) -> &StorageOptionValues {
        self.base.own()
    }

    fn fallback(&self) -> Option<Rc<dyn StorageOptions>> {
        self.base.fallback()
    }

    fn display_name(&self, text: &dyn TextOracle) -> String {
        text.translate_or_key(keys::FRIDGE_NAME)
    }

    fn description(&self, text: &dyn TextOracle) -> String {
        text.translate_or_key(keys::FRIDGE_DESCRIPTION)
    }
}
