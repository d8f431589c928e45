//! [`storage_core::DataOracle`] backed by a loaded data catalog.
use storage_content::DataCatalog;
use storage_core::{BigCraftableData, BuildingData, DataOracle, LocationData};

/// DataOracle implementation with static catalog records
pub struct DataOracleImpl {
    catalog: DataCatalog,
}

impl DataOracleImpl {
    pub fn new(catalog: DataCatalog) -> Self {
        Self { catalog }
    }

    pub fn catalog(&self) -> &DataCatalog {
        &self.catalog
    }
}

impl Default for DataOracleImpl {
    fn default() -> Self {
        Self::new(DataCatalog::default())
    }
}

impl DataOracle for DataOracleImpl {
    fn big_craftable(&self, item_id: &str) -> Option<BigCraftableData> {
        self.catalog.big_craftable(item_id).cloned()
    }

    fn building(&self, building_type: &str) -> Option<BuildingData> {
        self.catalog.building(building_type).cloned()
    }

    fn location(&self, name: &str) -> Option<LocationData> {
        self.catalog.location(name).cloned()
    }
}
