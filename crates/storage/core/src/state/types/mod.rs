pub mod common;
pub mod entities;
pub mod inventory;
pub mod item;
pub mod mod_data;
pub mod mutex;

pub use common::{BuildingId, FarmerId, LocationId, ObjectId, Tile};
pub use entities::{
    BuildingState, FarmerState, Fridge, LocationKind, LocationState, ObjectKind, ObjectState,
    Placement, Storage, StorageOwner,
};
pub use inventory::Inventory;
pub use item::ItemStack;
pub use mod_data::ModData;
pub use mutex::{MutexGuard, NetMutex};
