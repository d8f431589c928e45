use std::collections::BTreeMap;

use super::{BuildingId, FarmerId, Inventory, LocationId, ModData, NetMutex, ObjectId, Tile};

/// The entity whose inventory a container reads and writes.
///
/// Doubles as the identity key of a container: two containers with the same
/// owner are views of the same storage.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StorageOwner {
    Object(ObjectId),
    Building(BuildingId),
    /// Location-bound storage (the kitchen fridge).
    Fridge(LocationId),
    Farmer(FarmerId),
}

impl std::fmt::Display for StorageOwner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Object(id) => id.fmt(f),
            Self::Building(id) => id.fmt(f),
            Self::Fridge(id) => write!(f, "fridge@{id}"),
            Self::Farmer(id) => id.fmt(f),
        }
    }
}

/// Shared storage: an inventory plus its exclusive-access token.
#[derive(Debug, Default)]
pub struct Storage {
    pub inventory: Inventory,
    pub mutex: NetMutex,
}

impl Storage {
    pub fn new(natural_capacity: u32) -> Self {
        Self {
            inventory: Inventory::new(natural_capacity),
            mutex: NetMutex::new(),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LocationKind {
    #[default]
    Regular,
    /// One level of the underground mine. Every level is a distinct location.
    MineShaft { level: u32 },
}

#[derive(Debug)]
pub struct Fridge {
    pub tile: Tile,
    pub storage: Storage,
}

#[derive(Debug)]
pub struct LocationState {
    pub name: String,
    pub kind: LocationKind,
    pub fridge: Option<Fridge>,
    pub mod_data: ModData,
    pub(crate) objects: BTreeMap<Tile, ObjectId>,
    pub(crate) buildings: Vec<BuildingId>,
}

impl LocationState {
    pub fn new(name: impl Into<String>, kind: LocationKind) -> Self {
        Self {
            name: name.into(),
            kind,
            fridge: None,
            mod_data: ModData::new(),
            objects: BTreeMap::new(),
            buildings: Vec::new(),
        }
    }

    pub fn is_mine_shaft(&self) -> bool {
        matches!(self.kind, LocationKind::MineShaft { .. })
    }

    pub fn object_at(&self, tile: Tile) -> Option<ObjectId> {
        self.objects.get(&tile).copied()
    }

    /// Placed objects in tile order.
    pub fn objects(&self) -> impl Iterator<Item = (Tile, ObjectId)> + '_ {
        self.objects.iter().map(|(tile, id)| (*tile, *id))
    }

    pub fn buildings(&self) -> &[BuildingId] {
        &self.buildings
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ObjectKind {
    #[default]
    Standard,
    /// Crafting station that widens ingredient reach to nearby storages.
    Workbench,
}

/// Where an object currently is.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Placement {
    /// Placed on a tile of a location.
    Tile { location: LocationId, tile: Tile },
    /// Embedded in another object (furniture holding a storage).
    Held { host: ObjectId },
    /// Sitting as an item inside some storage.
    Stored { owner: StorageOwner },
    /// Known to the world but not placed anywhere.
    #[default]
    Loose,
}

#[derive(Debug)]
pub struct ObjectState {
    pub item_id: String,
    pub name: String,
    pub kind: ObjectKind,
    pub storage: Option<Storage>,
    pub mod_data: ModData,
    pub(crate) placement: Placement,
    pub(crate) held: Option<ObjectId>,
}

impl ObjectState {
    pub fn new(item_id: impl Into<String>, name: impl Into<String>, kind: ObjectKind) -> Self {
        Self {
            item_id: item_id.into(),
            name: name.into(),
            kind,
            storage: None,
            mod_data: ModData::new(),
            placement: Placement::Loose,
            held: None,
        }
    }

    /// Gives the object its own inventory of `natural_capacity` slots.
    pub fn with_storage(mut self, natural_capacity: u32) -> Self {
        self.storage = Some(Storage::new(natural_capacity));
        self
    }

    pub fn with_mod_data(mut self, mod_data: ModData) -> Self {
        self.mod_data = mod_data;
        self
    }

    pub fn placement(&self) -> Placement {
        self.placement
    }

    pub fn held(&self) -> Option<ObjectId> {
        self.held
    }

    pub fn is_workbench(&self) -> bool {
        self.kind == ObjectKind::Workbench
    }
}

#[derive(Debug)]
pub struct BuildingState {
    pub building_type: String,
    pub storage: Option<Storage>,
    pub mod_data: ModData,
    pub(crate) location: LocationId,
    pub(crate) tile: Tile,
}

impl BuildingState {
    pub fn location(&self) -> LocationId {
        self.location
    }

    pub fn tile(&self) -> Tile {
        self.tile
    }
}

/// A player. Its inventory is single-actor storage and carries no mutex.
#[derive(Debug)]
pub struct FarmerState {
    pub name: String,
    pub inventory: Inventory,
    pub mod_data: ModData,
    pub(crate) location: LocationId,
    pub(crate) tile: Tile,
}

impl FarmerState {
    pub fn location(&self) -> LocationId {
        self.location
    }

    pub fn tile(&self) -> Tile {
        self.tile
    }
}
