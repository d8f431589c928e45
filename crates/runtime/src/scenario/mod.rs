//! Scenario system for world layout and storage contents.
//!
//! A scenario lists locations (with their fridge, placed objects and
//! buildings) and farmers. Objects may embed a held storage or carry nested
//! storages as items, to any depth. Ids are allocated by [`World`] while the
//! scenario is built, never written in the file.

use std::path::Path;

use serde::{Deserialize, Serialize};
use storage_core::{
    ItemStack, LocationKind, ModData, ObjectId, ObjectKind, ObjectState, StorageOwner, Tile, World,
};

use crate::error::{Result, RuntimeError};

/// One slot of an inventory.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ItemSpec {
    /// Plain item stack.
    Stack {
        item_id: String,
        name: String,
        quantity: u32,
        #[serde(default)]
        max_stack: Option<u32>,
        #[serde(default)]
        tags: Vec<String>,
    },

    /// An item that is itself a storage.
    Storage(Box<ObjectSpec>),
}

/// Object specification. `tile` is only read for objects placed directly in
/// a location.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectSpec {
    pub item_id: String,
    pub name: String,
    #[serde(default)]
    pub kind: ObjectKind,
    #[serde(default)]
    pub tile: Option<Tile>,
    /// Natural capacity of the object's own storage, if it has one.
    #[serde(default)]
    pub capacity: Option<u32>,
    #[serde(default)]
    pub items: Vec<ItemSpec>,
    /// Storage embedded in this object (furniture-style).
    #[serde(default)]
    pub held: Option<Box<ObjectSpec>>,
    #[serde(default)]
    pub mod_data: ModData,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FridgeSpec {
    pub tile: Tile,
    pub capacity: u32,
    #[serde(default)]
    pub items: Vec<ItemSpec>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildingSpec {
    pub building_type: String,
    pub tile: Tile,
    #[serde(default)]
    pub capacity: Option<u32>,
    #[serde(default)]
    pub items: Vec<ItemSpec>,
    #[serde(default)]
    pub mod_data: ModData,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocationSpec {
    pub name: String,
    #[serde(default)]
    pub kind: LocationKind,
    #[serde(default)]
    pub fridge: Option<FridgeSpec>,
    #[serde(default)]
    pub objects: Vec<ObjectSpec>,
    #[serde(default)]
    pub buildings: Vec<BuildingSpec>,
    /// ModData of the location, which is also the fridge's ModData.
    #[serde(default)]
    pub mod_data: ModData,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FarmerSpec {
    pub name: String,
    /// Name of the location the farmer stands in.
    pub location: String,
    pub tile: Tile,
    pub backpack: u32,
    #[serde(default)]
    pub items: Vec<ItemSpec>,
}

/// Scenario configuration for world initialization.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scenario {
    #[serde(default)]
    pub locations: Vec<LocationSpec>,
    #[serde(default)]
    pub farmers: Vec<FarmerSpec>,
}

impl Scenario {
    pub fn new(locations: Vec<LocationSpec>, farmers: Vec<FarmerSpec>) -> Self {
        Self { locations, farmers }
    }

    /// Builds a fresh [`World`] from this scenario.
    ///
    /// Items are added up to each owner's natural capacity; anything that
    /// does not fit is an error rather than silently dropped.
    pub fn build_world(&self) -> Result<World> {
        let mut world = World::new();

        for spec in &self.locations {
            let location = world.add_location(spec.name.clone(), spec.kind)?;
            if let Some(state) = world.location_mut(location) {
                state.mod_data = spec.mod_data.clone();
            }
            if let Some(fridge) = &spec.fridge {
                world.set_fridge(location, fridge.tile, fridge.capacity)?;
                fill(&mut world, StorageOwner::Fridge(location), &fridge.items)?;
            }
            for building in &spec.buildings {
                let id = world.add_building(
                    building.building_type.clone(),
                    location,
                    building.tile,
                    building.capacity,
                )?;
                if let Some(state) = world.building_mut(id) {
                    state.mod_data = building.mod_data.clone();
                }
                fill(&mut world, StorageOwner::Building(id), &building.items)?;
            }
            for object in &spec.objects {
                let tile = object
                    .tile
                    .ok_or_else(|| RuntimeError::MissingTile(object.name.clone()))?;
                let id = spawn(&mut world, object)?;
                world.place_object(id, location, tile)?;
            }
        }

        for spec in &self.farmers {
            let location = world
                .location_by_name(&spec.location)
                .ok_or_else(|| RuntimeError::UnknownLocation(spec.location.clone()))?;
            let farmer = world.add_farmer(spec.name.clone(), location, spec.tile, spec.backpack)?;
            fill(&mut world, StorageOwner::Farmer(farmer), &spec.items)?;
        }

        tracing::info!(
            locations = self.locations.len(),
            farmers = self.farmers.len(),
            objects = world.objects().count(),
            "built world from scenario"
        );
        Ok(world)
    }

    /// Load scenario from a RON file.
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| RuntimeError::ScenarioRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> Result<Self> {
        ron::from_str(content).map_err(RuntimeError::ScenarioParse)
    }
}

/// Registers a loose object with its held storage and contents.
fn spawn(world: &mut World, spec: &ObjectSpec) -> Result<ObjectId> {
    let mut state = ObjectState::new(spec.item_id.clone(), spec.name.clone(), spec.kind)
        .with_mod_data(spec.mod_data.clone());
    if let Some(capacity) = spec.capacity {
        state = state.with_storage(capacity);
    }
    let id = world.add_object(state)?;

    if let Some(held) = &spec.held {
        let held_id = spawn(world, held)?;
        world.attach_held_object(id, held_id)?;
    }
    if !spec.items.is_empty() {
        fill(world, StorageOwner::Object(id), &spec.items)?;
    }
    Ok(id)
}

fn fill(world: &mut World, owner: StorageOwner, items: &[ItemSpec]) -> Result<()> {
    for spec in items {
        let item = match spec {
            ItemSpec::Stack {
                item_id,
                name,
                quantity,
                max_stack,
                tags,
            } => {
                let mut item = ItemStack::new(item_id.clone(), name.clone(), *quantity)
                    .with_tags(tags.iter().cloned());
                if let Some(max_stack) = max_stack {
                    item = item.with_max_stack(*max_stack);
                }
                item
            }
            ItemSpec::Storage(object) => {
                let id = spawn(world, object)?;
                ItemStack::storage_item(object.item_id.clone(), object.name.clone(), id)
            }
        };
        let name = item.name.clone();
        let capacity = world
            .inventory(owner)
            .map(|inventory| inventory.natural_capacity())
            .ok_or(storage_core::WorldError::MissingStorage(owner))?;
        if world.insert_item(owner, item, capacity)?.is_some() {
            return Err(RuntimeError::ScenarioOverflow {
                name,
                owner: owner.to_string(),
            });
        }
    }
    Ok(())
}
