use super::BaseContainer;
use crate::state::{LocationId, StorageOwner, World};

/// Location-bound storage. ModData is the location's.
#[derive(Clone, Debug)]
pub struct FridgeContainer {
    location: LocationId,
    base: BaseContainer,
}

impl FridgeContainer {
    pub fn new(location: LocationId, base: BaseContainer) -> Self {
        Self { location, base }
    }

    pub fn location(&self) -> LocationId {
        self.location
    }

    pub fn base(&self) -> &BaseContainer {
        &self.base
    }

    pub(super) fn key(&self) -> StorageOwner {
        StorageOwner::Fridge(self.location)
    }

    pub(super) fn is_alive(&self, world: &World) -> bool {
        world.is_alive(self.key())
    }
}
