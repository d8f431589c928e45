//! Layered storage options.
//!
//! Each layer holds raw [`StorageOptionValues`] where every field may sit at
//! its inherit sentinel. Reading a field through [`StorageOptions`] returns
//! the layer's own value, or asks the layer's default provider when the own
//! value inherits. A layer only ever looks one hop up; whoever builds the
//! provider decides what the next layer is (instance -> type -> global).
mod child;
mod custom_fields;
mod default;
mod enums;
mod typed;
mod values;

use std::fmt;
use std::rc::Rc;

use crate::env::TextOracle;

pub use child::ChildStorageOptions;
pub use custom_fields::CustomFieldsStorageOptions;
pub use default::DefaultStorageOptions;
pub use enums::{ChestMenuOption, FeatureOption, RangeOption};
pub use typed::{BigCraftableStorageOptions, BuildingStorageOptions, LocationStorageOptions};
pub use values::{InvalidOptionValue, StorageOptionField, StorageOptionValues};

/// Supplies the next layer. Must always produce a layer.
pub type DefaultProvider = Rc<dyn Fn() -> Rc<dyn StorageOptions>>;

/// Values that can defer to the next layer.
pub trait Inherit {
    fn is_inherit(&self) -> bool;
}

/// Own value unless it is the inherit sentinel, otherwise the value produced
/// by `get_default`. `get_default` is only called when needed; `None` (a root
/// layer) keeps the sentinel.
pub fn resolve<T>(own: &T, get_default: impl FnOnce() -> Option<T>) -> T
where
    T: Inherit + Clone,
{
    if own.is_inherit() {
        get_default().unwrap_or_else(|| own.clone())
    } else {
        own.clone()
    }
}

/// One layer of storage options.
pub trait StorageOptions: fmt::Debug {
    /// Raw values of this layer.
    fn own(&self) -> &StorageOptionValues;

    /// Next layer, or `None` for a root.
    fn fallback(&self) -> Option<Rc<dyn StorageOptions>> {
        None
    }

    fn display_name(&self, text: &dyn TextOracle) -> String;

    fn description(&self, text: &dyn TextOracle) -> String;

    fn access_chest(&self) -> RangeOption {
        resolve(&self.own().access_chest, || {
            self.fallback().map(|next| next.access_chest())
        })
    }

    fn auto_organize(&self) -> FeatureOption {
        resolve(&self.own().auto_organize, || {
            self.fallback().map(|next| next.auto_organize())
        })
    }

    fn carry_chest(&self) -> FeatureOption {
        resolve(&self.own().carry_chest, || {
            self.fallback().map(|next| next.carry_chest())
        })
    }

    fn categorize_chest(&self) -> FeatureOption {
        resolve(&self.own().categorize_chest, || {
            self.fallback().map(|next| next.categorize_chest())
        })
    }

    fn categorize_chest_search_term(&self) -> String {
        resolve(&self.own().categorize_chest_search_term, || {
            self.fallback().map(|next| next.categorize_chest_search_term())
        })
    }

    fn craft_from_chest(&self) -> RangeOption {
        resolve(&self.own().craft_from_chest, || {
            self.fallback().map(|next| next.craft_from_chest())
        })
    }

    fn craft_from_chest_distance(&self) -> i32 {
        resolve(&self.own().craft_from_chest_distance, || {
            self.fallback().map(|next| next.craft_from_chest_distance())
        })
    }

    fn resize_chest(&self) -> ChestMenuOption {
        resolve(&self.own().resize_chest, || {
            self.fallback().map(|next| next.resize_chest())
        })
    }

    fn resize_chest_capacity(&self) -> i32 {
        resolve(&self.own().resize_chest_capacity, || {
            self.fallback().map(|next| next.resize_chest_capacity())
        })
    }

    fn search_items(&self) -> FeatureOption {
        resolve(&self.own().search_items, || {
            self.fallback().map(|next| next.search_items())
        })
    }

    fn stash_to_chest(&self) -> RangeOption {
        resolve(&self.own().stash_to_chest, || {
            self.fallback().map(|next| next.stash_to_chest())
        })
    }

    fn stash_to_chest_distance(&self) -> i32 {
        resolve(&self.own().stash_to_chest_distance, || {
            self.fallback().map(|next| next.stash_to_chest_distance())
        })
    }

    fn stash_to_chest_priority(&self) -> i32 {
        resolve(&self.own().stash_to_chest_priority, || {
            self.fallback().map(|next| next.stash_to_chest_priority())
        })
    }

    fn storage_name(&self) -> String {
        resolve(&self.own().storage_name, || {
            self.fallback().map(|next| next.storage_name())
        })
    }

    /// Every field resolved through the layer chain.
    fn effective(&self) -> StorageOptionValues {
        StorageOptionValues {
            access_chest: self.access_chest(),
            auto_organize: self.auto_organize(),
            carry_chest: self.carry_chest(),
            categorize_chest: self.categorize_chest(),
            categorize_chest_search_term: self.categorize_chest_search_term(),
            craft_from_chest: self.craft_from_chest(),
            craft_from_chest_distance: self.craft_from_chest_distance(),
            resize_chest: self.resize_chest(),
            resize_chest_capacity: self.resize_chest_capacity(),
            search_items: self.search_items(),
            stash_to_chest: self.stash_to_chest(),
            stash_to_chest_distance: self.stash_to_chest_distance(),
            stash_to_chest_priority: self.stash_to_chest_priority(),
            storage_name: self.storage_name(),
        }
    }
}

/// Provider that always hands out the same layer.
pub fn provider_of<O>(options: Rc<O>) -> DefaultProvider
where
    O: StorageOptions + 'static,
{
    Rc::new(move || Rc::clone(&options) as Rc<dyn StorageOptions>)
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use strum::IntoEnumIterator;

    use super::*;

    struct PlainText;

    impl TextOracle for PlainText {
        fn parse_tokens(&self, raw: &str) -> String {
            raw.to_owned()
        }

        fn translate(&self, _key: &str) -> Option<String> {
            None
        }
    }

    fn fully_set() -> StorageOptionValues {
        StorageOptionValues {
            access_chest: RangeOption::World,
            auto_organize: FeatureOption::Disabled,
            carry_chest: FeatureOption::Enabled,
            categorize_chest: FeatureOption::Enabled,
            categorize_chest_search_term: "#fish".into(),
            craft_from_chest: RangeOption::Inventory,
            craft_from_chest_distance: 4,
            resize_chest: ChestMenuOption::Small,
            resize_chest_capacity: -1,
            search_items: FeatureOption::Disabled,
            stash_to_chest: RangeOption::Location,
            stash_to_chest_distance: 9,
            stash_to_chest_priority: -2,
            storage_name: "Root".into(),
        }
    }

    fn other_values() -> StorageOptionValues {
        StorageOptionValues {
            access_chest: RangeOption::Disabled,
            auto_organize: FeatureOption::Enabled,
            carry_chest: FeatureOption::Disabled,
            categorize_chest: FeatureOption::Disabled,
            categorize_chest_search_term: "wood".into(),
            craft_from_chest: RangeOption::World,
            craft_from_chest_distance: 1,
            resize_chest: ChestMenuOption::Large,
            resize_chest_capacity: 12,
            search_items: FeatureOption::Enabled,
            stash_to_chest: RangeOption::Disabled,
            stash_to_chest_distance: -1,
            stash_to_chest_priority: 5,
            storage_name: "Own".into(),
        }
    }

    #[test]
    fn resolve_returns_own_value_without_asking_the_default() {
        let calls = Cell::new(0);
        let value = resolve(&RangeOption::World, || {
            calls.set(calls.get() + 1);
            Some(RangeOption::Disabled)
        });
        assert_eq!(value, RangeOption::World);
        assert_eq!(calls.get(), 0);

        let inherited = resolve(&0_i32, || {
            calls.set(calls.get() + 1);
            Some(7)
        });
        assert_eq!(inherited, 7);
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn every_field_is_own_when_set_and_default_when_sentinel() {
        let root = Rc::new(DefaultStorageOptions::new(fully_set()));
        let provider = provider_of(root);

        for field in StorageOptionField::iter() {
            let mut own = StorageOptionValues::default();
            let own_raw = other_values().get(field).expect("set");
            own.set(field, &own_raw).unwrap();
            let layer = ChildStorageOptions::new(Rc::clone(&provider), own);
            assert_eq!(layer.effective().get(field), Some(own_raw), "{field} own");

            let empty = ChildStorageOptions::new(Rc::clone(&provider), StorageOptionValues::default());
            assert_eq!(empty.effective().get(field), fully_set().get(field), "{field} default");
        }
    }

    #[test]
    fn layers_chain_through_their_providers() {
        let global = Rc::new(DefaultStorageOptions::new(fully_set()));
        let per_type = Rc::new(ChildStorageOptions::new(
            provider_of(global),
            StorageOptionValues {
                craft_from_chest: RangeOption::Location,
                ..StorageOptionValues::default()
            },
        ));
        let instance = ChildStorageOptions::new(
            provider_of(per_type),
            StorageOptionValues {
                craft_from_chest_distance: 2,
                ..StorageOptionValues::default()
            },
        );

        assert_eq!(instance.craft_from_chest(), RangeOption::Location);
        assert_eq!(instance.craft_from_chest_distance(), 2);
        assert_eq!(instance.access_chest(), RangeOption::World);
        assert_eq!(instance.display_name(&PlainText), "Root");
    }

    #[test]
    fn a_root_layer_keeps_its_sentinels() {
        let root = DefaultStorageOptions::new(StorageOptionValues::default());
        assert_eq!(root.craft_from_chest(), RangeOption::Default);
        assert_eq!(root.resize_chest_capacity(), 0);
        assert!(root.fallback().is_none());
    }
}
