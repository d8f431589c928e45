//! Runtime wiring for storage containers.
//!
//! This crate turns loaded content into oracle implementations, builds worlds
//! from scenario files, and hosts the feature services that consume the
//! storage-core container contract.
//!
//! Modules are organized by responsibility:
//! - [`oracle`] implements the storage-core oracle traits over loaded content
//! - [`scenario`] builds a [`storage_core::World`] from a RON layout
//! - [`features`] hosts craft-from-chest, resize, stash and categorize services
//! - [`item_matcher`] parses and applies search filters
pub mod error;
pub mod features;
pub mod item_matcher;
pub mod oracle;
pub mod scenario;

pub use error::{Result, RuntimeError};
pub use features::{
    CategorizeChest, CraftFromChest, CraftingRequest, Feature, ResizeChest, StashReport,
    StashToChest, StashedItem,
};
pub use item_matcher::ItemMatcher;
pub use oracle::{DataOracleImpl, OracleManager, RecordingMenuOracle, TextOracleImpl};
pub use scenario::{
    BuildingSpec, FarmerSpec, FridgeSpec, ItemSpec, LocationSpec, ObjectSpec, Scenario,
};
