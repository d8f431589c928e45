//! World registry errors.
//!
//! Errors raised while mutating the world: unknown ids, occupied tiles and
//! storage nesting violations.

use crate::error::{ErrorSeverity, StorageFault};
use crate::state::{BuildingId, FarmerId, LocationId, ObjectId, StorageOwner, Tile};

/// Errors that occur during world registry operations.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum WorldError {
    #[error("unknown location {0}")]
    UnknownLocation(LocationId),

    #[error("unknown object {0}")]
    UnknownObject(ObjectId),

    #[error("unknown building {0}")]
    UnknownBuilding(BuildingId),

    #[error("unknown farmer {0}")]
    UnknownFarmer(FarmerId),

    /// The entity exists but carries no inventory.
    #[error("{0} has no storage")]
    MissingStorage(StorageOwner),

    /// Tile already holds an object.
    #[error("tile {tile} of {location} is occupied by {occupant}")]
    TileOccupied {
        location: LocationId,
        tile: Tile,
        occupant: ObjectId,
    },

    /// Object must be loose before it can be placed, held or stored.
    #[error("{0} is already placed")]
    AlreadyPlaced(ObjectId),

    /// Host object already embeds another object.
    #[error("{host} already holds {held}")]
    HostOccupied { host: ObjectId, held: ObjectId },

    /// A storage cannot end up inside itself.
    #[error("{object} cannot be stored inside {owner}")]
    SelfInsertion { object: ObjectId, owner: StorageOwner },

    /// The insert would nest storages deeper than [`World::MAX_NESTING_DEPTH`](crate::state::World::MAX_NESTING_DEPTH).
    #[error("{object} would nest {depth} levels deep inside {owner}")]
    NestingTooDeep {
        object: ObjectId,
        owner: StorageOwner,
        depth: usize,
    },

    #[error("{0} has no free slot")]
    InventoryFull(StorageOwner),

    /// Id allocator exhausted.
    #[error("entity id overflow (current: {current})")]
    IdOverflow { current: u32 },
}

impl StorageFault for WorldError {
    fn severity(&self) -> ErrorSeverity {
        use WorldError::*;
        match self {
            InventoryFull(_) => ErrorSeverity::Recoverable,
            IdOverflow { .. } => ErrorSeverity::Internal,
            UnknownLocation(_)
            | UnknownObject(_)
            | UnknownBuilding(_)
            | UnknownFarmer(_)
            | MissingStorage(_)
            | TileOccupied { .. }
            | AlreadyPlaced(_)
            | HostOccupied { .. }
            | SelfInsertion { .. }
            | NestingTooDeep { .. } => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        use WorldError::*;
        match self {
            UnknownLocation(_) => "WORLD_UNKNOWN_LOCATION",
            UnknownObject(_) => "WORLD_UNKNOWN_OBJECT",
            UnknownBuilding(_) => "WORLD_UNKNOWN_BUILDING",
            UnknownFarmer(_) => "WORLD_UNKNOWN_FARMER",
            MissingStorage(_) => "WORLD_MISSING_STORAGE",
            TileOccupied { .. } => "WORLD_TILE_OCCUPIED",
            AlreadyPlaced(_) => "WORLD_ALREADY_PLACED",
            HostOccupied { .. } => "WORLD_HOST_OCCUPIED",
            SelfInsertion { .. } => "WORLD_SELF_INSERTION",
            NestingTooDeep { .. } => "WORLD_NESTING_TOO_DEEP",
            InventoryFull(_) => "WORLD_INVENTORY_FULL",
            IdOverflow { .. } => "WORLD_ID_OVERFLOW",
        }
    }
}
