//! Capacity overrides for chest-backed storages.
//!
//! The override itself is applied at the single read site,
//! [`storage_core::Container::capacity`]; this service exposes the
//! feature switch and the menu size that goes with it.
use storage_core::{Container, ContainerFactory, RawHandle, StorageError, World};

use super::Feature;

pub struct ResizeChest<'f> {
    factory: &'f ContainerFactory<'f>,
}

impl<'f> ResizeChest<'f> {
    pub fn new(factory: &'f ContainerFactory<'f>) -> Self {
        Self { factory }
    }

    /// Effective capacity of whatever `handle` classifies as.
    pub fn capacity_of(
        &self,
        world: &World,
        handle: RawHandle<'_>,
    ) -> Option<Result<u32, StorageError>> {
        self.factory
            .try_get_one(world, handle)
            .map(|container| container.capacity(world))
    }

    /// Rows of the item menu for `container`, when resizing picks a size.
    pub fn menu_rows(&self, world: &World, container: &Container) -> Result<Option<u32>, StorageError> {
        if !self.should_be_active() || container.is_farmer() {
            return Ok(None);
        }
        Ok(container.options(world)?.resize_chest().rows())
    }
}

impl Feature for ResizeChest<'_> {
    fn name(&self) -> &'static str {
        "resize_chest"
    }

    fn should_be_active(&self) -> bool {
        self.factory.config().resize_chest_active()
    }
}
