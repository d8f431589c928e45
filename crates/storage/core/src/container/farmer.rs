use super::BaseContainer;
use crate::state::{FarmerId, StorageOwner, World};

/// A player's own inventory. Never resized and never locked.
#[derive(Clone, Debug)]
pub struct FarmerContainer {
    farmer: FarmerId,
    base: BaseContainer,
}

impl FarmerContainer {
    pub fn new(farmer: FarmerId, base: BaseContainer) -> Self {
        Self { farmer, base }
    }

    pub fn farmer(&self) -> FarmerId {
        self.farmer
    }

    pub fn base(&self) -> &BaseContainer {
        &self.base
    }

    pub(super) fn key(&self) -> StorageOwner {
        StorageOwner::Farmer(self.farmer)
    }

    pub(super) fn is_alive(&self, world: &World) -> bool {
        world.is_alive(self.key())
    }
}
