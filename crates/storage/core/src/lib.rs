//! Storage containers and layered storage options.
//!
//! `storage-core` models every storage-bearing entity (placed chests, held
//! objects, buildings, fridges, farmer inventories) behind the uniform
//! [`Container`] handle, resolves cascading [`StorageOptions`] from instance
//! ModData through per-type data to global defaults, and classifies raw world
//! handles via [`ContainerFactory`]. All entity state lives in the [`World`]
//! registry; containers only hold ids into it.
pub mod config;
pub mod container;
pub mod env;
pub mod error;
pub mod factory;
pub mod options;
pub mod policy;
pub mod state;

pub use config::StorageConfig;
pub use container::{
    AddOutcome, BaseContainer, BuildingContainer, ChildContainer, Container, ContainerKind,
    FarmerContainer, FridgeContainer, ObjectContainer, ObjectSource, StorageError,
};
pub use env::{
    BigCraftableData, BuildingData, DataOracle, Env, LocationData, MenuOracle, MenuRequest,
    OPEN_CHEST_SOUND, OracleError, StorageEnv, TextOracle,
};
pub use error::{ErrorSeverity, StorageFault};
pub use factory::{ContainerFactory, ContainerWalk, RawHandle};
pub use options::{
    ChestMenuOption, ChildStorageOptions, DefaultProvider, DefaultStorageOptions, FeatureOption,
    Inherit, RangeOption, StorageOptionField, StorageOptionValues, StorageOptions, resolve,
};
pub use policy::{
    LocationExclusions, RangeMode, RangeReference, Reach, UNBOUNDED_CAPACITY_FLOOR,
    effective_capacity,
};
pub use state::{
    BuildingId, FarmerId, Inventory, ItemStack, LocationId, LocationKind, ModData, MutexGuard,
    NetMutex, ObjectId, ObjectKind, ObjectState, Placement, StorageOwner, Tile, World, WorldError,
};
