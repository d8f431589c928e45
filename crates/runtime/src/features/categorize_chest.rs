//! Saved item filters on storages.
use storage_core::{Container, ContainerFactory, FeatureOption, ItemStack, StorageError, World};

use super::Feature;
use crate::item_matcher::ItemMatcher;

pub struct CategorizeChest<'f> {
    factory: &'f ContainerFactory<'f>,
}

impl<'f> CategorizeChest<'f> {
    pub fn new(factory: &'f ContainerFactory<'f>) -> Self {
        Self { factory }
    }

    /// Filter saved on `container`; empty while categorizing is off for it.
    pub fn filter(&self, world: &World, container: &Container) -> Result<ItemMatcher, StorageError> {
        let options = container.options(world)?;
        if !self.should_be_active() || !options.categorize_chest().is_enabled() {
            return Ok(ItemMatcher::default());
        }
        Ok(ItemMatcher::parse(
            &options.categorize_chest_search_term(),
            self.factory.config().search_tag_symbol,
        ))
    }

    /// Saves `term` as the filter of `container`. A blank term clears it.
    pub fn set_filter(
        &self,
        world: &mut World,
        container: &Container,
        term: &str,
    ) -> Result<(), StorageError> {
        let term = term.trim().to_owned();
        tracing::debug!(key = %container.storage_key(), %term, "saving storage filter");
        container.update_options(world, |values| values.categorize_chest_search_term = term)
    }

    pub fn accepts(
        &self,
        world: &World,
        container: &Container,
        item: &ItemStack,
    ) -> Result<bool, StorageError> {
        Ok(self.filter(world, container)?.matches(item))
    }
}

impl Feature for CategorizeChest<'_> {
    fn name(&self) -> &'static str {
        "categorize_chest"
    }

    fn should_be_active(&self) -> bool {
        self.factory.config().default_options.categorize_chest != FeatureOption::Disabled
    }
}
