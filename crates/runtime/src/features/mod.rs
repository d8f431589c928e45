//! Feature services built on the container contract.
//!
//! Each feature reaches storages only through [`storage_core::ContainerFactory`]
//! and reads its settings from the factory's [`storage_core::StorageConfig`].
//! Features never test concrete entity kinds beyond what the contract exposes.
mod categorize_chest;
mod craft_from_chest;
mod resize_chest;
mod stash_to_chest;

pub use categorize_chest::CategorizeChest;
pub use craft_from_chest::{CraftFromChest, CraftingRequest};
pub use resize_chest::ResizeChest;
pub use stash_to_chest::{StashReport, StashToChest, StashedItem};

use storage_core::{Container, LocationExclusions, RangeReference, Reach, World};

/// Common surface of every feature service.
pub trait Feature {
    /// Returns a stable name for this feature (used in logging).
    fn name(&self) -> &'static str;

    /// Whether the feature should run under the current configuration.
    fn should_be_active(&self) -> bool;
}

/// Where `container` is, or `None` when it is gone or not placed anywhere.
pub(crate) fn reach_of(world: &World, container: &Container) -> Option<Reach> {
    match container.reach(world) {
        Ok(reach) => Some(reach),
        Err(error) => {
            tracing::trace!(%error, key = %container.storage_key(), "container has no reach");
            None
        }
    }
}

/// True when either end of the range sits in an excluded location.
pub(crate) fn is_excluded(
    world: &World,
    exclusions: &LocationExclusions,
    reference: &RangeReference,
    reach: &Reach,
) -> bool {
    if exclusions.is_empty() {
        return false;
    }
    [reference.location, reach.location]
        .into_iter()
        .filter_map(|id| world.location(id))
        .any(|location| exclusions.excludes(location))
}
