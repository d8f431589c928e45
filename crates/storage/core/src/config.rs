use crate::options::{ChestMenuOption, FeatureOption, RangeOption, StorageOptionValues};
use crate::policy::LocationExclusions;

/// Global configuration: the root options layer plus feature-level settings.
///
/// Passed explicitly to the factory and to feature predicates.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct StorageConfig {
    /// Root of every option chain.
    pub default_options: StorageOptionValues,
    /// Locations where crafting never pulls from storages.
    pub craft_from_chest_disable_locations: Vec<String>,
    /// Range used when crafting from a workbench, regardless of each storage's own range.
    pub craft_from_workbench: RangeOption,
    pub craft_from_workbench_distance: i32,
    /// Locations where stashing is switched off.
    pub stash_to_chest_disable_locations: Vec<String>,
    /// Prefix marking a context-tag term in search filters.
    pub search_tag_symbol: char,
}

impl StorageConfig {
    // ===== runtime-tunable defaults =====
    pub const DEFAULT_CRAFT_FROM_CHEST_DISTANCE: i32 = -1;
    pub const DEFAULT_RESIZE_CHEST_CAPACITY: i32 = 70;
    pub const DEFAULT_STASH_TO_CHEST_DISTANCE: i32 = 10;
    pub const DEFAULT_WORKBENCH_DISTANCE: i32 = -1;
    pub const DEFAULT_SEARCH_TAG_SYMBOL: char = '#';

    pub fn new() -> Self {
        Self {
            default_options: Self::shipped_options(),
            craft_from_chest_disable_locations: Vec::new(),
            craft_from_workbench: RangeOption::Location,
            craft_from_workbench_distance: Self::DEFAULT_WORKBENCH_DISTANCE,
            stash_to_chest_disable_locations: Vec::new(),
            search_tag_symbol: Self::DEFAULT_SEARCH_TAG_SYMBOL,
        }
    }

    /// Root option values shipped with the crate.
    pub fn shipped_options() -> StorageOptionValues {
        StorageOptionValues {
            access_chest: RangeOption::Location,
            auto_organize: FeatureOption::Disabled,
            carry_chest: FeatureOption::Enabled,
            categorize_chest: FeatureOption::Enabled,
            categorize_chest_search_term: String::new(),
            craft_from_chest: RangeOption::Location,
            craft_from_chest_distance: Self::DEFAULT_CRAFT_FROM_CHEST_DISTANCE,
            resize_chest: ChestMenuOption::Large,
            resize_chest_capacity: Self::DEFAULT_RESIZE_CHEST_CAPACITY,
            search_items: FeatureOption::Enabled,
            stash_to_chest: RangeOption::Location,
            stash_to_chest_distance: Self::DEFAULT_STASH_TO_CHEST_DISTANCE,
            stash_to_chest_priority: 0,
            storage_name: String::new(),
        }
    }

    /// Capacity overrides apply only while the root layer leaves resizing on.
    pub fn resize_chest_active(&self) -> bool {
        self.default_options.resize_chest != ChestMenuOption::Disabled
    }

    /// Craft-from-chest is active unless the root layer disables it.
    pub fn craft_from_chest_active(&self) -> bool {
        self.default_options.craft_from_chest != RangeOption::Disabled
    }

    /// Workbench crafting needs an explicit range on the config itself.
    pub fn craft_from_workbench_active(&self) -> bool {
        !matches!(
            self.craft_from_workbench,
            RangeOption::Disabled | RangeOption::Default
        )
    }

    pub fn stash_to_chest_active(&self) -> bool {
        self.default_options.stash_to_chest != RangeOption::Disabled
    }

    pub fn craft_from_chest_exclusions(&self) -> LocationExclusions {
        LocationExclusions::new(self.craft_from_chest_disable_locations.iter().cloned())
    }

    pub fn stash_to_chest_exclusions(&self) -> LocationExclusions {
        LocationExclusions::new(self.stash_to_chest_disable_locations.iter().cloned())
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shipped_defaults_leave_features_on() {
        let config = StorageConfig::default();
        assert!(config.resize_chest_active());
        assert!(config.craft_from_chest_active());
        assert!(config.craft_from_workbench_active());
        assert_eq!(config.default_options.craft_from_chest_distance, -1);
    }

    #[test]
    fn disabling_the_root_layer_turns_resizing_off() {
        let mut config = StorageConfig::default();
        config.default_options.resize_chest = ChestMenuOption::Disabled;
        config.craft_from_workbench = RangeOption::Default;
        assert!(!config.resize_chest_active());
        assert!(!config.craft_from_workbench_active());
    }
}
