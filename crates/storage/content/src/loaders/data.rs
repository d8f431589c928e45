//! Data catalog loader.
//!
//! The catalog stands in for the game's data tables: big craftables keyed by
//! qualified item id, buildings keyed by building type, locations keyed by
//! name. Each record carries the custom fields the type options layer reads.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use storage_core::{BigCraftableData, BuildingData, LocationData};

use crate::loaders::{LoadResult, read_file};

/// Data catalog structure for RON files.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DataCatalog {
    pub big_craftables: BTreeMap<String, BigCraftableData>,
    pub buildings: BTreeMap<String, BuildingData>,
    pub locations: BTreeMap<String, LocationData>,
}

impl DataCatalog {
    pub fn big_craftable(&self, item_id: &str) -> Option<&BigCraftableData> {
        self.big_craftables.get(item_id)
    }

    pub fn building(&self, building_type: &str) -> Option<&BuildingData> {
        self.buildings.get(building_type)
    }

    pub fn location(&self, name: &str) -> Option<&LocationData> {
        self.locations.get(name)
    }

    pub fn is_empty(&self) -> bool {
        self.big_craftables.is_empty() && self.buildings.is_empty() && self.locations.is_empty()
    }
}

/// Loader for the data catalog from RON files.
pub struct DataLoader;

impl DataLoader {
    /// Load the data catalog from a RON file.
    pub fn load(path: &Path) -> LoadResult<DataCatalog> {
        let content = read_file(path)?;
        let catalog = Self::parse(&content)?;
        tracing::debug!(
            path = %path.display(),
            big_craftables = catalog.big_craftables.len(),
            buildings = catalog.buildings.len(),
            locations = catalog.locations.len(),
            "loaded data catalog"
        );
        Ok(catalog)
    }

    pub fn parse(content: &str) -> LoadResult<DataCatalog> {
        ron::from_str(content).map_err(|e| anyhow::anyhow!("Failed to parse data catalog RON: {}", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CATALOG: &str = r#"(
        big_craftables: {
            "(BC)130": (
                name: "Chest",
                display_name: "[LocalizedText Strings\\BigCraftables:Chest_Name]",
                description: "A place to store your items.",
                custom_fields: {
                    "storage-options/resize_chest": "large",
                    "storage-options/resize_chest_capacity": "70",
                },
            ),
        },
        buildings: {
            "Mill": (name: "Mill"),
        },
    )"#;

    #[test]
    fn parses_records_with_custom_fields() {
        let catalog = DataLoader::parse(CATALOG).unwrap();

        let chest = catalog.big_craftable("(BC)130").unwrap();
        assert_eq!(chest.name, "Chest");
        assert_eq!(
            chest.custom_fields.get("storage-options/resize_chest").map(String::as_str),
            Some("large")
        );
        assert!(catalog.building("Mill").unwrap().custom_fields.is_empty());
        assert!(catalog.location("Farm").is_none());
        assert!(catalog.locations.is_empty());
    }

    #[test]
    fn empty_catalog_is_valid() {
        let catalog = DataLoader::parse("()").unwrap();
        assert!(catalog.is_empty());
    }

    #[test]
    fn load_reads_catalog_from_disk() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("data.ron");
        std::fs::write(&path, CATALOG).unwrap();

        let catalog = DataLoader::load(&path).unwrap();
        assert_eq!(catalog.big_craftables.len(), 1);
    }
}
