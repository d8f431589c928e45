use std::str::FromStr;

use strum::{AsRefStr, Display, EnumIter, EnumString, IntoEnumIterator};

use super::{ChestMenuOption, FeatureOption, Inherit, RangeOption};
use crate::state::ModData;

/// Raw per-layer option values. Every field starts at its inherit sentinel.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct StorageOptionValues {
    pub access_chest: RangeOption,
    pub auto_organize: FeatureOption,
    pub carry_chest: FeatureOption,
    pub categorize_chest: FeatureOption,
    /// Saved filter of the categorize feature.
    pub categorize_chest_search_term: String,
    pub craft_from_chest: RangeOption,
    /// Tile radius for `Location` range. Negative means the whole location.
    pub craft_from_chest_distance: i32,
    pub resize_chest: ChestMenuOption,
    /// Slot override. Negative is unbounded, zero keeps the natural size.
    pub resize_chest_capacity: i32,
    pub search_items: FeatureOption,
    pub stash_to_chest: RangeOption,
    pub stash_to_chest_distance: i32,
    pub stash_to_chest_priority: i32,
    pub storage_name: String,
}

/// Names of the option fields, used as string-map keys.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display, EnumString, AsRefStr, EnumIter)]
#[strum(serialize_all = "snake_case")]
pub enum StorageOptionField {
    AccessChest,
    AutoOrganize,
    CarryChest,
    CategorizeChest,
    CategorizeChestSearchTerm,
    CraftFromChest,
    CraftFromChestDistance,
    ResizeChest,
    ResizeChestCapacity,
    SearchItems,
    StashToChest,
    StashToChestDistance,
    StashToChestPriority,
    StorageName,
}

impl StorageOptionField {
    /// Prefix shared by every option key in custom fields and ModData.
    pub const KEY_PREFIX: &'static str = "storage-options/";

    pub fn key(self) -> String {
        format!("{}{}", Self::KEY_PREFIX, self.as_ref())
    }

    /// Field named by a prefixed key, if any.
    pub fn from_key(key: &str) -> Option<Self> {
        key.strip_prefix(Self::KEY_PREFIX)
            .and_then(|name| Self::from_str(name).ok())
    }
}

/// A string that is not a valid value for its field.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("invalid value '{value}' for option {field}")]
pub struct InvalidOptionValue {
    pub field: StorageOptionField,
    pub value: String,
}

fn parse<T: FromStr>(field: StorageOptionField, raw: &str) -> Result<T, InvalidOptionValue> {
    raw.parse().map_err(|_| InvalidOptionValue {
        field,
        value: raw.to_owned(),
    })
}

fn raw<T: Inherit + ToString>(value: &T) -> Option<String> {
    (!value.is_inherit()).then(|| value.to_string())
}

impl StorageOptionValues {
    /// Parses every prefixed key of a string map. Unknown keys are ignored;
    /// invalid values are logged and left at their sentinel.
    pub fn from_fields<'a, I>(fields: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut values = Self::default();
        for (key, value) in fields {
            let Some(field) = StorageOptionField::from_key(key) else {
                continue;
            };
            if let Err(error) = values.set(field, value) {
                tracing::warn!(%error, key, "ignoring storage option");
            }
        }
        values
    }

    pub fn from_mod_data(mod_data: &ModData) -> Self {
        Self::from_fields(mod_data.iter())
    }

    /// Sets one field from its string form. Blank input resets the field.
    pub fn set(&mut self, field: StorageOptionField, value: &str) -> Result<(), InvalidOptionValue> {
        use StorageOptionField::*;

        let value = value.trim();
        if value.is_empty() {
            self.clear(field);
            return Ok(());
        }
        match field {
            AccessChest => self.access_chest = parse(field, value)?,
            AutoOrganize => self.auto_organize = parse(field, value)?,
            CarryChest => self.carry_chest = parse(field, value)?,
            CategorizeChest => self.categorize_chest = parse(field, value)?,
            CategorizeChestSearchTerm => self.categorize_chest_search_term = value.to_owned(),
            CraftFromChest => self.craft_from_chest = parse(field, value)?,
            CraftFromChestDistance => self.craft_from_chest_distance = parse(field, value)?,
            ResizeChest => self.resize_chest = parse(field, value)?,
            ResizeChestCapacity => self.resize_chest_capacity = parse(field, value)?,
            SearchItems => self.search_items = parse(field, value)?,
            StashToChest => self.stash_to_chest = parse(field, value)?,
            StashToChestDistance => self.stash_to_chest_distance = parse(field, value)?,
            StashToChestPriority => self.stash_to_chest_priority = parse(field, value)?,
            StorageName => self.storage_name = value.to_owned(),
        }
        Ok(())
    }

    /// Resets one field to its sentinel.
    pub fn clear(&mut self, field: StorageOptionField) {
        use StorageOptionField::*;

        match field {
            AccessChest => self.access_chest = RangeOption::Default,
            AutoOrganize => self.auto_organize = FeatureOption::Default,
            CarryChest => self.carry_chest = FeatureOption::Default,
            CategorizeChest => self.categorize_chest = FeatureOption::Default,
            CategorizeChestSearchTerm => self.categorize_chest_search_term.clear(),
            CraftFromChest => self.craft_from_chest = RangeOption::Default,
            CraftFromChestDistance => self.craft_from_chest_distance = 0,
            ResizeChest => self.resize_chest = ChestMenuOption::Default,
            ResizeChestCapacity => self.resize_chest_capacity = 0,
            SearchItems => self.search_items = FeatureOption::Default,
            StashToChest => self.stash_to_chest = RangeOption::Default,
            StashToChestDistance => self.stash_to_chest_distance = 0,
            StashToChestPriority => self.stash_to_chest_priority = 0,
            StorageName => self.storage_name.clear(),
        }
    }

    /// String form of a field, or `None` while it holds its sentinel.
    pub fn get(&self, field: StorageOptionField) -> Option<String> {
        use StorageOptionField::*;

        match field {
            AccessChest => raw(&self.access_chest),
            AutoOrganize => raw(&self.auto_organize),
            CarryChest => raw(&self.carry_chest),
            CategorizeChest => raw(&self.categorize_chest),
            CategorizeChestSearchTerm => raw(&self.categorize_chest_search_term),
            CraftFromChest => raw(&self.craft_from_chest),
            CraftFromChestDistance => raw(&self.craft_from_chest_distance),
            ResizeChest => raw(&self.resize_chest),
            ResizeChestCapacity => raw(&self.resize_chest_capacity),
            SearchItems => raw(&self.search_items),
            StashToChest => raw(&self.stash_to_chest),
            StashToChestDistance => raw(&self.stash_to_chest_distance),
            StashToChestPriority => raw(&self.stash_to_chest_priority),
            StorageName => raw(&self.storage_name),
        }
    }

    /// True when every field inherits.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Writes set fields into `mod_data` and drops keys of inheriting fields.
    pub fn write_to(&self, mod_data: &mut ModData) {
        for field in StorageOptionField::iter() {
            match self.get(field) {
                Some(value) => {
                    mod_data.insert(field.key(), value);
                }
                None => {
                    mod_data.remove(&field.key());
                }
            }
        }
    }
}
