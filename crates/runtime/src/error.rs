//! Errors surfaced by the storage runtime.
use std::path::PathBuf;

use storage_core::{ErrorSeverity, StorageError, StorageFault, WorldError};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("failed to read scenario file {path}")]
    ScenarioRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse scenario RON")]
    ScenarioParse(#[source] ron::error::SpannedError),

    #[error("scenario references unknown location '{0}'")]
    UnknownLocation(String),

    #[error("scenario object '{0}' needs a tile to be placed")]
    MissingTile(String),

    #[error("scenario object '{name}' does not fit into {owner}")]
    ScenarioOverflow { name: String, owner: String },

    #[error(transparent)]
    World(#[from] WorldError),

    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl StorageFault for RuntimeError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::World(error) => error.severity(),
            Self::Storage(error) => error.severity(),
            _ => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::ScenarioRead { .. } => "RUNTIME_SCENARIO_READ",
            Self::ScenarioParse(_) => "RUNTIME_SCENARIO_PARSE",
            Self::UnknownLocation(_) => "RUNTIME_UNKNOWN_LOCATION",
            Self::MissingTile(_) => "RUNTIME_MISSING_TILE",
            Self::ScenarioOverflow { .. } => "RUNTIME_SCENARIO_OVERFLOW",
            Self::World(error) => error.error_code(),
            Self::Storage(error) => error.error_code(),
        }
    }
}
