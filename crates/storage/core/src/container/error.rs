//! Container access errors.

use crate::env::OracleError;
use crate::error::{ErrorSeverity, StorageFault};
use crate::state::{FarmerId, ObjectId, StorageOwner, WorldError};

/// Errors returned by [`Container`](super::Container) operations.
///
/// Classification failure is not an error: the factory simply returns `None`.
/// A partial add is not an error either; see [`AddOutcome`](super::AddOutcome).
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum StorageError {
    /// The entity behind the container was removed. Drop the container.
    #[error("{owner} no longer exists")]
    StaleReference { owner: StorageOwner },

    /// The storage exists but sits nowhere in the world.
    #[error("{owner} is not placed in any location")]
    NotPlaced { owner: StorageOwner },

    /// Exclusive access is held by someone else. Try again on a later tick.
    #[error("{owner} is in use by {holder}")]
    Contended { owner: StorageOwner, holder: FarmerId },

    #[error("{object} cannot be stored inside {owner}")]
    SelfInsertion { object: ObjectId, owner: StorageOwner },

    #[error(transparent)]
    Oracle(#[from] OracleError),

    #[error(transparent)]
    World(WorldError),
}

impl StorageError {
    /// True when the container should be dropped from consideration.
    pub fn is_stale(&self) -> bool {
        matches!(self, Self::StaleReference { .. })
    }
}

impl From<WorldError> for StorageError {
    fn from(error: WorldError) -> Self {
        match error {
            WorldError::SelfInsertion { object, owner } => Self::SelfInsertion { object, owner },
            WorldError::MissingStorage(owner) => Self::StaleReference { owner },
            other => Self::World(other),
        }
    }
}

impl StorageFault for StorageError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Contended { .. } => ErrorSeverity::Recoverable,
            Self::StaleReference { .. } | Self::NotPlaced { .. } | Self::SelfInsertion { .. } => {
                ErrorSeverity::Validation
            }
            Self::Oracle(error) => error.severity(),
            Self::World(error) => error.severity(),
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::StaleReference { .. } => "STORAGE_STALE_REFERENCE",
            Self::NotPlaced { .. } => "STORAGE_NOT_PLACED",
            Self::Contended { .. } => "STORAGE_CONTENDED",
            Self::SelfInsertion { .. } => "STORAGE_SELF_INSERTION",
            Self::Oracle(error) => error.error_code(),
            Self::World(error) => error.error_code(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contention_is_the_only_retryable_failure() {
        let owner = StorageOwner::Object(ObjectId(3));
        let contended = StorageError::Contended {
            owner,
            holder: FarmerId(1),
        };
        assert!(contended.severity().is_recoverable());
        assert!(!StorageError::StaleReference { owner }.severity().is_recoverable());
        assert_eq!(
            StorageError::from(OracleError::MenuNotAvailable).error_code(),
            "ORACLE_MENU_NOT_AVAILABLE"
        );
    }

    #[test]
    fn world_errors_map_onto_container_failures() {
        let owner = StorageOwner::Object(ObjectId(2));
        assert!(StorageError::from(WorldError::MissingStorage(owner)).is_stale());
        assert_eq!(
            StorageError::from(WorldError::SelfInsertion {
                object: ObjectId(1),
                owner
            }),
            StorageError::SelfInsertion {
                object: ObjectId(1),
                owner
            }
        );
    }
}
