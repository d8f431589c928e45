//! Crafting with ingredients pulled from nearby storages.
use storage_core::{
    Container, ContainerFactory, FarmerId, LocationExclusions, LocationId, RangeMode, RangeOption,
    RangeReference, StorageError, StorageOwner, Tile, World,
};

use super::{Feature, is_excluded, reach_of};

/// A crafting menu asking for its ingredient storages.
///
/// The menu may be anchored somewhere other than the farmer (a workbench);
/// unset fields default to the farmer's own position.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CraftingRequest {
    pub farmer: FarmerId,
    pub location: Option<LocationId>,
    pub tile: Option<Tile>,
}

impl CraftingRequest {
    pub fn at_farmer(farmer: FarmerId) -> Self {
        Self {
            farmer,
            location: None,
            tile: None,
        }
    }

    pub fn at(farmer: FarmerId, location: LocationId, tile: Tile) -> Self {
        Self {
            farmer,
            location: Some(location),
            tile: Some(tile),
        }
    }
}

pub struct CraftFromChest<'f> {
    factory: &'f ContainerFactory<'f>,
    exclusions: LocationExclusions,
}

impl<'f> CraftFromChest<'f> {
    pub fn new(factory: &'f ContainerFactory<'f>) -> Self {
        Self {
            factory,
            exclusions: factory.config().craft_from_chest_exclusions(),
        }
    }

    /// Eligibility for ambient crafting: each storage's own range applies and
    /// an inheriting range counts as off.
    pub fn default_predicate(
        &self,
        world: &World,
        reference: &RangeReference,
        container: &Container,
    ) -> bool {
        if container.is_farmer() {
            return false;
        }
        let Ok(options) = container.options(world) else {
            return false;
        };
        let range = options.craft_from_chest();
        if matches!(range, RangeOption::Disabled | RangeOption::Default) {
            return false;
        }
        let mode = RangeMode::from_option(range, options.craft_from_chest_distance());
        self.reachable(world, reference, container, mode)
    }

    /// Eligibility for workbench crafting: the global workbench range applies
    /// to every storage and an inheriting range counts as on.
    pub fn workbench_predicate(
        &self,
        world: &World,
        reference: &RangeReference,
        container: &Container,
    ) -> bool {
        if container.is_farmer() {
            return false;
        }
        let Ok(options) = container.options(world) else {
            return false;
        };
        if options.craft_from_chest() == RangeOption::Disabled {
            return false;
        }
        let config = self.factory.config();
        let mode = RangeMode::from_option(
            config.craft_from_workbench,
            config.craft_from_workbench_distance,
        );
        self.reachable(world, reference, container, mode)
    }

    /// Storages a crafting menu may pull from, each with its location.
    ///
    /// The workbench predicate is used when the menu's anchor tile holds a
    /// workbench, the default predicate otherwise.
    pub fn populate_containers(
        &self,
        world: &World,
        request: CraftingRequest,
    ) -> Result<Vec<(Container, LocationId)>, StorageError> {
        let reference = self.reference(world, request)?;
        let workbench = world
            .object_at(reference.location, reference.tile)
            .and_then(|id| world.object(id))
            .is_some_and(|object| object.is_workbench());

        let containers: Vec<_> = self
            .factory
            .get_all(world, |container| {
                if workbench {
                    self.workbench_predicate(world, &reference, container)
                } else {
                    self.default_predicate(world, &reference, container)
                }
            })
            .filter_map(|container| {
                let location = container.location(world).ok()?;
                Some((container, location))
            })
            .collect();

        tracing::debug!(
            farmer = %request.farmer,
            workbench,
            count = containers.len(),
            "populated crafting containers"
        );
        Ok(containers)
    }

    fn reference(
        &self,
        world: &World,
        request: CraftingRequest,
    ) -> Result<RangeReference, StorageError> {
        let farmer = world
            .farmer(request.farmer)
            .ok_or(StorageError::StaleReference {
                owner: StorageOwner::Farmer(request.farmer),
            })?;
        Ok(RangeReference {
            farmer: Some(request.farmer),
            location: request.location.unwrap_or(farmer.location()),
            tile: request.tile.unwrap_or(farmer.tile()),
        })
    }

    fn reachable(
        &self,
        world: &World,
        reference: &RangeReference,
        container: &Container,
        mode: RangeMode,
    ) -> bool {
        if !container.items(world).is_ok_and(|items| !items.is_empty()) {
            return false;
        }
        let Some(reach) = reach_of(world, container) else {
            return false;
        };
        if is_excluded(world, &self.exclusions, reference, &reach) {
            tracing::trace!(key = %container.storage_key(), "crafting disabled in location");
            return false;
        }
        mode.within(reference, &reach)
    }
}

impl Feature for CraftFromChest<'_> {
    fn name(&self) -> &'static str {
        "craft_from_chest"
    }

    fn should_be_active(&self) -> bool {
        self.factory.config().craft_from_chest_active()
    }
}
