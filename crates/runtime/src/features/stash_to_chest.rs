//! Moving items from a farmer's inventory into nearby storages.
//!
//! A storage takes an item when it already holds some of it or when its
//! saved filter accepts it. Storages are tried in descending stash priority;
//! each one is locked while items move and skipped if someone else holds it.
use storage_core::{
    Container, ContainerFactory, FarmerId, ItemStack, LocationExclusions, RangeMode, RangeOption,
    RangeReference, StorageError, StorageOwner, World,
};

use super::{CategorizeChest, Feature, is_excluded, reach_of};

/// One stack (or part of one) that changed hands.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StashedItem {
    pub target: StorageOwner,
    pub item_id: String,
    pub quantity: u32,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StashReport {
    pub stashed: Vec<StashedItem>,
    /// Storages skipped because another farmer held their mutex.
    pub contended: Vec<StorageOwner>,
}

impl StashReport {
    pub fn total(&self) -> u32 {
        self.stashed.iter().map(|item| item.quantity).sum()
    }
}

pub struct StashToChest<'f> {
    factory: &'f ContainerFactory<'f>,
    exclusions: LocationExclusions,
}

impl<'f> StashToChest<'f> {
    pub fn new(factory: &'f ContainerFactory<'f>) -> Self {
        Self {
            factory,
            exclusions: factory.config().stash_to_chest_exclusions(),
        }
    }

    /// Whether `container` is a stash target for a farmer at `reference`.
    pub fn predicate(&self, world: &World, reference: &RangeReference, container: &Container) -> bool {
        if container.is_farmer() {
            return false;
        }
        let Ok(options) = container.options(world) else {
            return false;
        };
        let range = options.stash_to_chest();
        if matches!(range, RangeOption::Disabled | RangeOption::Default) {
            return false;
        }
        let Some(reach) = reach_of(world, container) else {
            return false;
        };
        if is_excluded(world, &self.exclusions, reference, &reach) {
            return false;
        }
        RangeMode::from_option(range, options.stash_to_chest_distance()).within(reference, &reach)
    }

    /// Stashes everything the farmer carries that some in-range storage takes.
    pub fn stash(&self, world: &mut World, farmer: FarmerId) -> Result<StashReport, StorageError> {
        let mut report = StashReport::default();
        if !self.should_be_active() {
            return Ok(report);
        }

        let state = world.farmer(farmer).ok_or(StorageError::StaleReference {
            owner: StorageOwner::Farmer(farmer),
        })?;
        let reference = RangeReference {
            farmer: Some(farmer),
            location: state.location(),
            tile: state.tile(),
        };

        let view: &World = world;
        let mut targets: Vec<(i32, Container)> = self
            .factory
            .get_all(view, |container| self.predicate(view, &reference, container))
            .filter_map(|container| {
                let priority = container.options(view).ok()?.stash_to_chest_priority();
                Some((priority, container))
            })
            .collect();
        targets.sort_by_key(|(priority, _)| std::cmp::Reverse(*priority));

        let categorize = CategorizeChest::new(self.factory);
        for (_, container) in &targets {
            let _guard = match container.lock(world, farmer) {
                Ok(guard) => guard,
                Err(StorageError::Contended { owner, holder }) => {
                    tracing::debug!(%owner, %holder, "storage busy, skipping stash");
                    report.contended.push(owner);
                    continue;
                }
                Err(error) => return Err(error),
            };
            self.stash_into(world, farmer, container, &categorize, &mut report)?;
        }

        tracing::info!(
            farmer = %farmer,
            targets = targets.len(),
            stashed = report.total(),
            "stash to chest finished"
        );
        Ok(report)
    }

    fn stash_into(
        &self,
        world: &mut World,
        farmer: FarmerId,
        container: &Container,
        categorize: &CategorizeChest<'_>,
        report: &mut StashReport,
    ) -> Result<(), StorageError> {
        let owner = StorageOwner::Farmer(farmer);
        let carried: Vec<ItemStack> = world
            .inventory(owner)
            .map(|inventory| inventory.items().to_vec())
            .unwrap_or_default();
        let filter = categorize.filter(world, container)?;

        for item in carried {
            if item.storage.is_some() {
                continue;
            }
            let held = container
                .items(world)?
                .iter()
                .any(|stack| stack.item_id == item.item_id && stack.storage.is_none());
            if !held && !filter.matches(&item) {
                continue;
            }
            if !world.remove_item(owner, &item)? {
                continue;
            }

            let offered = item.quantity;
            let item_id = item.item_id.clone();
            let outcome = container.try_add(world, item)?;
            let mut moved = offered;
            if let Some(remainder) = outcome.remainder {
                moved -= remainder.quantity;
                let capacity = world
                    .inventory(owner)
                    .map_or(0, |inventory| inventory.natural_capacity());
                if let Some(lost) = world.insert_item(owner, remainder, capacity)? {
                    tracing::warn!(item = %lost.item_id, quantity = lost.quantity, "stash remainder did not fit back");
                }
            }
            if moved > 0 {
                report.stashed.push(StashedItem {
                    target: container.storage_key(),
                    item_id,
                    quantity: moved,
                });
            }
        }
        Ok(())
    }
}

impl Feature for StashToChest<'_> {
    fn name(&self) -> &'static str {
        "stash_to_chest"
    }

    fn should_be_active(&self) -> bool {
        self.factory.config().stash_to_chest_active()
    }
}
