use super::BaseContainer;
use crate::state::{BuildingId, StorageOwner, World};

/// Storage built into a building (a mill's output bin, a shipping bin).
#[derive(Clone, Debug)]
pub struct BuildingContainer {
    building: BuildingId,
    base: BaseContainer,
}

impl BuildingContainer {
    pub fn new(building: BuildingId, base: BaseContainer) -> Self {
        Self { building, base }
    }

    pub fn building(&self) -> BuildingId {
        self.building
    }

    pub fn base(&self) -> &BaseContainer {
        &self.base
    }

    pub(super) fn key(&self) -> StorageOwner {
        StorageOwner::Building(self.building)
    }

    pub(super) fn is_alive(&self, world: &World) -> bool {
        world.is_alive(self.key())
    }
}
