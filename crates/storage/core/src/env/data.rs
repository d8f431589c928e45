use std::collections::BTreeMap;

/// Read-only lookups into the game's static data tables.
///
/// Lookups return owned records so implementations are free to build them on
/// demand. A missing record is normal (modded items, unknown maps); callers
/// fall back to empty custom fields.
pub trait DataOracle {
    /// Big-craftable record for a qualified item id such as `(BC)130`.
    fn big_craftable(&self, item_id: &str) -> Option<BigCraftableData>;

    fn building(&self, building_type: &str) -> Option<BuildingData>;

    fn location(&self, name: &str) -> Option<LocationData>;
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct BigCraftableData {
    pub name: String,
    /// Raw display-name template, resolved through the text oracle.
    pub display_name: String,
    /// Raw description template.
    pub description: String,
    pub custom_fields: BTreeMap<String, String>,
}

impl BigCraftableData {
    /// Stand-in used when the data table has no record: the object's own name
    /// and no custom fields.
    pub fn untitled(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            display_name: name.clone(),
            name,
            ..Self::default()
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct BuildingData {
    /// Raw name template.
    pub name: String,
    pub description: String,
    pub custom_fields: BTreeMap<String, String>,
}

impl BuildingData {
    pub fn untitled(building_type: impl Into<String>) -> Self {
        Self {
            name: building_type.into(),
            ..Self::default()
        }
    }
}

/// Location record. Location data carries no localized text of its own.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct LocationData {
    pub custom_fields: BTreeMap<String, String>,
}
