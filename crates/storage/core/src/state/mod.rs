//! Authoritative world registry.
//!
//! [`World`] owns every storage-bearing entity: locations (and their fridge),
//! placed or nested objects, buildings and farmers. Containers never hold the
//! entities themselves, only ids into this registry. Ids come from a single
//! monotonically increasing allocator and are never reused, so an id that no
//! longer resolves means the entity was removed.
pub mod error;
pub mod types;

use std::collections::BTreeMap;

pub use error::WorldError;
pub use types::{
    BuildingId, BuildingState, FarmerId, FarmerState, Fridge, Inventory, ItemStack, LocationId,
    LocationKind, LocationState, ModData, MutexGuard, NetMutex, ObjectId, ObjectKind, ObjectState,
    Placement, Storage, StorageOwner, Tile,
};

/// Registry of every storage-bearing entity in scope.
#[derive(Debug)]
pub struct World {
    locations: BTreeMap<LocationId, LocationState>,
    objects: BTreeMap<ObjectId, ObjectState>,
    buildings: BTreeMap<BuildingId, BuildingState>,
    farmers: BTreeMap<FarmerId, FarmerState>,

    /// Sequential id allocator shared by all entity kinds. Never reused.
    next_id: u32,

    /// Bumped whenever ModData may have been written through any handle.
    mod_data_revision: u64,
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

impl World {
    /// Longest chain of nested storages followed before giving up.
    pub const MAX_NESTING_DEPTH: usize = 16;

    pub fn new() -> Self {
        Self {
            locations: BTreeMap::new(),
            objects: BTreeMap::new(),
            buildings: BTreeMap::new(),
            farmers: BTreeMap::new(),
            next_id: 1,
            mod_data_revision: 0,
        }
    }

    fn allocate(&mut self) -> Result<u32, WorldError> {
        let id = self.next_id;
        self.next_id = id
            .checked_add(1)
            .ok_or(WorldError::IdOverflow { current: id })?;
        Ok(id)
    }

    // ===== construction =====

    pub fn add_location(
        &mut self,
        name: impl Into<String>,
        kind: LocationKind,
    ) -> Result<LocationId, WorldError> {
        let id = LocationId(self.allocate()?);
        self.locations.insert(id, LocationState::new(name, kind));
        Ok(id)
    }

    /// Installs (or replaces) the fridge of a location.
    pub fn set_fridge(
        &mut self,
        location: LocationId,
        tile: Tile,
        natural_capacity: u32,
    ) -> Result<(), WorldError> {
        let state = self
            .locations
            .get_mut(&location)
            .ok_or(WorldError::UnknownLocation(location))?;
        let previous = state.fridge.replace(Fridge {
            tile,
            storage: Storage::new(natural_capacity),
        });
        if let Some(previous) = previous {
            self.purge_nested(previous.storage.inventory.nested_storages().collect());
        }
        Ok(())
    }

    /// Registers a loose object. Use [`World::place_object`],
    /// [`World::attach_held_object`] or [`World::stow_object`] to put it somewhere.
    pub fn add_object(&mut self, mut state: ObjectState) -> Result<ObjectId, WorldError> {
        let id = ObjectId(self.allocate()?);
        state.placement = Placement::Loose;
        state.held = None;
        self.objects.insert(id, state);
        Ok(id)
    }

    pub fn add_building(
        &mut self,
        building_type: impl Into<String>,
        location: LocationId,
        tile: Tile,
        storage_capacity: Option<u32>,
    ) -> Result<BuildingId, WorldError> {
        if !self.locations.contains_key(&location) {
            return Err(WorldError::UnknownLocation(location));
        }
        let id = BuildingId(self.allocate()?);
        self.buildings.insert(
            id,
            BuildingState {
                building_type: building_type.into(),
                storage: storage_capacity.map(Storage::new),
                mod_data: ModData::new(),
                location,
                tile,
            },
        );
        if let Some(state) = self.locations.get_mut(&location) {
            state.buildings.push(id);
        }
        Ok(id)
    }

    pub fn add_farmer(
        &mut self,
        name: impl Into<String>,
        location: LocationId,
        tile: Tile,
        backpack_size: u32,
    ) -> Result<FarmerId, WorldError> {
        if !self.locations.contains_key(&location) {
            return Err(WorldError::UnknownLocation(location));
        }
        let id = FarmerId(self.allocate()?);
        self.farmers.insert(
            id,
            FarmerState {
                name: name.into(),
                inventory: Inventory::new(backpack_size),
                mod_data: ModData::new(),
                location,
                tile,
            },
        );
        Ok(id)
    }

    // ===== placement =====

    pub fn place_object(
        &mut self,
        object: ObjectId,
        location: LocationId,
        tile: Tile,
    ) -> Result<(), WorldError> {
        self.ensure_loose(object)?;
        let state = self
            .locations
            .get_mut(&location)
            .ok_or(WorldError::UnknownLocation(location))?;
        if let Some(occupant) = state.object_at(tile) {
            return Err(WorldError::TileOccupied {
                location,
                tile,
                occupant,
            });
        }
        state.objects.insert(tile, object);
        self.set_placement(object, Placement::Tile { location, tile });
        Ok(())
    }

    /// Embeds `held` into `host`, the way furniture carries a storage.
    pub fn attach_held_object(&mut self, host: ObjectId, held: ObjectId) -> Result<(), WorldError> {
        if host == held {
            return Err(WorldError::SelfInsertion {
                object: held,
                owner: StorageOwner::Object(host),
            });
        }
        self.ensure_loose(held)?;
        self.check_nesting(held, StorageOwner::Object(host))?;
        let state = self
            .objects
            .get_mut(&host)
            .ok_or(WorldError::UnknownObject(host))?;
        if let Some(existing) = state.held {
            return Err(WorldError::HostOccupied {
                host,
                held: existing,
            });
        }
        state.held = Some(held);
        self.set_placement(held, Placement::Held { host });
        Ok(())
    }

    /// Puts a loose storage object into `owner`'s inventory, limited to the
    /// owner's natural capacity.
    pub fn stow_object(&mut self, owner: StorageOwner, object: ObjectId) -> Result<(), WorldError> {
        let state = self
            .objects
            .get(&object)
            .ok_or(WorldError::UnknownObject(object))?;
        if state.storage.is_none() {
            return Err(WorldError::MissingStorage(StorageOwner::Object(object)));
        }
        let item = ItemStack::storage_item(state.item_id.clone(), state.name.clone(), object);
        let capacity = self
            .inventory(owner)
            .ok_or(WorldError::MissingStorage(owner))?
            .natural_capacity();
        match self.insert_item(owner, item, capacity)? {
            Some(_) => Err(WorldError::InventoryFull(owner)),
            None => Ok(()),
        }
    }

    pub fn move_farmer(
        &mut self,
        farmer: FarmerId,
        location: LocationId,
        tile: Tile,
    ) -> Result<(), WorldError> {
        if !self.locations.contains_key(&location) {
            return Err(WorldError::UnknownLocation(location));
        }
        let state = self
            .farmers
            .get_mut(&farmer)
            .ok_or(WorldError::UnknownFarmer(farmer))?;
        state.location = location;
        state.tile = tile;
        Ok(())
    }

    // ===== inventory mutation =====

    /// Adds `item` to `owner`'s inventory with `capacity` slots available.
    ///
    /// Storage items are checked for self-insertion and, once fully added,
    /// become [`Placement::Stored`] under `owner`. Returns the portion that
    /// did not fit.
    pub fn insert_item(
        &mut self,
        owner: StorageOwner,
        item: ItemStack,
        capacity: u32,
    ) -> Result<Option<ItemStack>, WorldError> {
        let nested = item.storage;
        if let Some(object) = nested {
            self.ensure_loose(object)?;
            self.check_nesting(object, owner)?;
        }

        let inventory = self
            .inventory_mut(owner)
            .ok_or(WorldError::MissingStorage(owner))?;
        let remainder = inventory.add(item, capacity);

        if let (None, Some(object)) = (&remainder, nested) {
            self.set_placement(object, Placement::Stored { owner });
        }
        Ok(remainder)
    }

    /// Removes the slot equal to `item` from `owner`'s inventory. A removed
    /// storage item becomes loose.
    pub fn remove_item(&mut self, owner: StorageOwner, item: &ItemStack) -> Result<bool, WorldError> {
        let inventory = self
            .inventory_mut(owner)
            .ok_or(WorldError::MissingStorage(owner))?;
        if !inventory.remove(item) {
            return Ok(false);
        }
        inventory.remove_empty_slots();

        if let Some(object) = item.storage {
            let stored_here = self
                .objects
                .get(&object)
                .is_some_and(|state| state.placement == Placement::Stored { owner });
            if stored_here {
                self.set_placement(object, Placement::Loose);
            }
        }
        Ok(true)
    }

    // ===== removal =====

    /// Removes an object together with everything nested in it.
    pub fn remove_object(&mut self, object: ObjectId) -> Result<(), WorldError> {
        let placement = self
            .objects
            .get(&object)
            .ok_or(WorldError::UnknownObject(object))?
            .placement;

        match placement {
            Placement::Tile { location, tile } => {
                if let Some(state) = self.locations.get_mut(&location) {
                    state.objects.remove(&tile);
                }
            }
            Placement::Held { host } => {
                if let Some(state) = self.objects.get_mut(&host) {
                    state.held = None;
                }
            }
            Placement::Stored { owner } => {
                if let Some(inventory) = self.inventory_mut(owner) {
                    inventory.remove_storage(object);
                }
            }
            Placement::Loose => {}
        }

        self.purge_nested(vec![object]);
        Ok(())
    }

    pub fn remove_building(&mut self, building: BuildingId) -> Result<(), WorldError> {
        let state = self
            .buildings
            .remove(&building)
            .ok_or(WorldError::UnknownBuilding(building))?;
        if let Some(location) = self.locations.get_mut(&state.location) {
            location.buildings.retain(|id| *id != building);
        }
        if let Some(storage) = state.storage {
            self.purge_nested(storage.inventory.nested_storages().collect());
        }
        Ok(())
    }

    pub fn remove_fridge(&mut self, location: LocationId) -> Result<(), WorldError> {
        let fridge = self
            .locations
            .get_mut(&location)
            .ok_or(WorldError::UnknownLocation(location))?
            .fridge
            .take()
            .ok_or(WorldError::MissingStorage(StorageOwner::Fridge(location)))?;
        self.purge_nested(fridge.storage.inventory.nested_storages().collect());
        Ok(())
    }

    pub fn remove_farmer(&mut self, farmer: FarmerId) -> Result<(), WorldError> {
        let state = self
            .farmers
            .remove(&farmer)
            .ok_or(WorldError::UnknownFarmer(farmer))?;
        self.purge_nested(state.inventory.nested_storages().collect());
        Ok(())
    }

    fn purge_nested(&mut self, mut pending: Vec<ObjectId>) {
        while let Some(id) = pending.pop() {
            if let Some(state) = self.objects.remove(&id) {
                pending.extend(state.held);
                if let Some(storage) = &state.storage {
                    pending.extend(storage.inventory.nested_storages());
                }
            }
        }
    }

    /// Rejects putting `object` under `owner` when it would end up inside
    /// itself or push any storage below [`World::MAX_NESTING_DEPTH`].
    fn check_nesting(&self, object: ObjectId, owner: StorageOwner) -> Result<(), WorldError> {
        let chain = self.ancestors(owner);
        if chain.contains(&StorageOwner::Object(object)) {
            return Err(WorldError::SelfInsertion { object, owner });
        }
        let depth = chain.len() + self.nesting_height(object);
        if depth > Self::MAX_NESTING_DEPTH {
            return Err(WorldError::NestingTooDeep {
                object,
                owner,
                depth,
            });
        }
        Ok(())
    }

    /// Levels of storages held or stored below `object`; 0 when it contains none.
    fn nesting_height(&self, object: ObjectId) -> usize {
        let Some(state) = self.objects.get(&object) else {
            return 0;
        };
        let stored = state
            .storage
            .iter()
            .flat_map(|storage| storage.inventory.nested_storages());
        state
            .held
            .into_iter()
            .chain(stored)
            .map(|inner| 1 + self.nesting_height(inner))
            .max()
            .unwrap_or(0)
    }

    fn ensure_loose(&self, object: ObjectId) -> Result<(), WorldError> {
        let state = self
            .objects
            .get(&object)
            .ok_or(WorldError::UnknownObject(object))?;
        match state.placement {
            Placement::Loose => Ok(()),
            _ => Err(WorldError::AlreadyPlaced(object)),
        }
    }

    fn set_placement(&mut self, object: ObjectId, placement: Placement) {
        if let Some(state) = self.objects.get_mut(&object) {
            state.placement = placement;
        }
    }

    // ===== queries =====

    pub fn location(&self, id: LocationId) -> Option<&LocationState> {
        self.locations.get(&id)
    }

    pub fn location_mut(&mut self, id: LocationId) -> Option<&mut LocationState> {
        self.touch_mod_data();
        self.locations.get_mut(&id)
    }

    pub fn location_by_name(&self, name: &str) -> Option<LocationId> {
        self.locations
            .iter()
            .find(|(_, state)| state.name == name)
            .map(|(id, _)| *id)
    }

    pub fn locations(&self) -> impl Iterator<Item = (LocationId, &LocationState)> {
        self.locations.iter().map(|(id, state)| (*id, state))
    }

    pub fn object(&self, id: ObjectId) -> Option<&ObjectState> {
        self.objects.get(&id)
    }

    pub fn object_mut(&mut self, id: ObjectId) -> Option<&mut ObjectState> {
        self.touch_mod_data();
        self.objects.get_mut(&id)
    }

    pub fn objects(&self) -> impl Iterator<Item = (ObjectId, &ObjectState)> {
        self.objects.iter().map(|(id, state)| (*id, state))
    }

    pub fn building(&self, id: BuildingId) -> Option<&BuildingState> {
        self.buildings.get(&id)
    }

    pub fn building_mut(&mut self, id: BuildingId) -> Option<&mut BuildingState> {
        self.touch_mod_data();
        self.buildings.get_mut(&id)
    }

    pub fn buildings(&self) -> impl Iterator<Item = (BuildingId, &BuildingState)> {
        self.buildings.iter().map(|(id, state)| (*id, state))
    }

    pub fn farmer(&self, id: FarmerId) -> Option<&FarmerState> {
        self.farmers.get(&id)
    }

    /// Direct access to a farmer. Storage items should move through
    /// [`World::insert_item`] and [`World::remove_item`] to keep placements right.
    pub fn farmer_mut(&mut self, id: FarmerId) -> Option<&mut FarmerState> {
        self.touch_mod_data();
        self.farmers.get_mut(&id)
    }

    pub fn farmers(&self) -> impl Iterator<Item = (FarmerId, &FarmerState)> {
        self.farmers.iter().map(|(id, state)| (*id, state))
    }

    pub fn object_at(&self, location: LocationId, tile: Tile) -> Option<ObjectId> {
        self.locations.get(&location)?.object_at(tile)
    }

    // ===== storage access keyed by owner =====

    /// Whether `owner` still exists and still carries storage.
    pub fn is_alive(&self, owner: StorageOwner) -> bool {
        self.inventory(owner).is_some()
    }

    pub fn inventory(&self, owner: StorageOwner) -> Option<&Inventory> {
        match owner {
            StorageOwner::Object(id) => self.objects.get(&id)?.storage.as_ref().map(|s| &s.inventory),
            StorageOwner::Building(id) => self
                .buildings
                .get(&id)?
                .storage
                .as_ref()
                .map(|s| &s.inventory),
            StorageOwner::Fridge(id) => self
                .locations
                .get(&id)?
                .fridge
                .as_ref()
                .map(|f| &f.storage.inventory),
            StorageOwner::Farmer(id) => self.farmers.get(&id).map(|f| &f.inventory),
        }
    }

    pub fn inventory_mut(&mut self, owner: StorageOwner) -> Option<&mut Inventory> {
        match owner {
            StorageOwner::Object(id) => self
                .objects
                .get_mut(&id)?
                .storage
                .as_mut()
                .map(|s| &mut s.inventory),
            StorageOwner::Building(id) => self
                .buildings
                .get_mut(&id)?
                .storage
                .as_mut()
                .map(|s| &mut s.inventory),
            StorageOwner::Fridge(id) => self
                .locations
                .get_mut(&id)?
                .fridge
                .as_mut()
                .map(|f| &mut f.storage.inventory),
            StorageOwner::Farmer(id) => self.farmers.get_mut(&id).map(|f| &mut f.inventory),
        }
    }

    /// Exclusive-access token of a shared storage. Farmers have none.
    pub fn mutex(&self, owner: StorageOwner) -> Option<&NetMutex> {
        match owner {
            StorageOwner::Object(id) => self.objects.get(&id)?.storage.as_ref().map(|s| &s.mutex),
            StorageOwner::Building(id) => {
                self.buildings.get(&id)?.storage.as_ref().map(|s| &s.mutex)
            }
            StorageOwner::Fridge(id) => {
                self.locations.get(&id)?.fridge.as_ref().map(|f| &f.storage.mutex)
            }
            StorageOwner::Farmer(_) => None,
        }
    }

    /// ModData of the entity behind `owner`. A fridge shares its location's.
    pub fn mod_data(&self, owner: StorageOwner) -> Option<&ModData> {
        match owner {
            StorageOwner::Object(id) => self.objects.get(&id).map(|s| &s.mod_data),
            StorageOwner::Building(id) => self.buildings.get(&id).map(|s| &s.mod_data),
            StorageOwner::Fridge(id) => self.locations.get(&id).map(|s| &s.mod_data),
            StorageOwner::Farmer(id) => self.farmers.get(&id).map(|s| &s.mod_data),
        }
    }

    pub fn mod_data_mut(&mut self, owner: StorageOwner) -> Option<&mut ModData> {
        self.touch_mod_data();
        match owner {
            StorageOwner::Object(id) => self.objects.get_mut(&id).map(|s| &mut s.mod_data),
            StorageOwner::Building(id) => self.buildings.get_mut(&id).map(|s| &mut s.mod_data),
            StorageOwner::Fridge(id) => self.locations.get_mut(&id).map(|s| &mut s.mod_data),
            StorageOwner::Farmer(id) => self.farmers.get_mut(&id).map(|s| &mut s.mod_data),
        }
    }

    /// Counter that changes on every mutable access that can reach ModData.
    /// Cached option layers compare it to tell whether they are still current.
    pub fn mod_data_revision(&self) -> u64 {
        self.mod_data_revision
    }

    fn touch_mod_data(&mut self) {
        self.mod_data_revision = self.mod_data_revision.wrapping_add(1);
    }

    /// Chain of owners from `owner` up to the outermost one, following
    /// `Held` hosts and `Stored` owners.
    pub fn ancestors(&self, owner: StorageOwner) -> Vec<StorageOwner> {
        let mut chain = vec![owner];
        let mut current = owner;
        // Insertions keep chains acyclic, so no chain is longer than the object count.
        for _ in 0..self.objects.len() {
            let StorageOwner::Object(id) = current else {
                break;
            };
            let next = match self.objects.get(&id).map(|state| state.placement) {
                Some(Placement::Held { host }) => StorageOwner::Object(host),
                Some(Placement::Stored { owner }) => owner,
                _ => break,
            };
            chain.push(next);
            current = next;
        }
        chain
    }

    /// Physical position of `owner`, resolved through nesting.
    pub fn owner_position(&self, owner: StorageOwner) -> Option<(LocationId, Tile)> {
        let root = *self.ancestors(owner).last()?;
        match root {
            StorageOwner::Object(id) => match self.objects.get(&id)?.placement {
                Placement::Tile { location, tile } => Some((location, tile)),
                _ => None,
            },
            StorageOwner::Building(id) => {
                let state = self.buildings.get(&id)?;
                Some((state.location, state.tile))
            }
            StorageOwner::Fridge(id) => {
                let fridge = self.locations.get(&id)?.fridge.as_ref()?;
                Some((id, fridge.tile))
            }
            StorageOwner::Farmer(id) => {
                let state = self.farmers.get(&id)?;
                Some((state.location, state.tile))
            }
        }
    }

    /// Physical position of an object, resolved through hosts and owners.
    pub fn resolve_placement(&self, object: ObjectId) -> Option<(LocationId, Tile)> {
        self.owner_position(StorageOwner::Object(object))
    }

    /// Farmer carrying `owner` in their inventory, directly or nested.
    pub fn carrier(&self, owner: StorageOwner) -> Option<FarmerId> {
        match self.ancestors(owner).last() {
            Some(StorageOwner::Farmer(id)) => Some(*id),
            _ => None,
        }
    }
}
