use strum::{AsRefStr, Display, EnumIter, EnumString};

use super::Inherit;

/// How far away a storage may be and still take part in a feature.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Display, EnumString, AsRefStr, EnumIter,
)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum RangeOption {
    /// Inherit from the next layer.
    #[default]
    Default,
    Disabled,
    /// Only storages carried in the player's inventory.
    Inventory,
    /// Storages in the same location, optionally within a tile distance.
    Location,
    /// Anywhere in the world.
    World,
}

/// On/off switch with an inherit state.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Display, EnumString, AsRefStr, EnumIter,
)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum FeatureOption {
    #[default]
    Default,
    Disabled,
    Enabled,
}

impl FeatureOption {
    pub fn is_enabled(self) -> bool {
        self == Self::Enabled
    }
}

/// Size of the item menu shown for a resized storage.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Display, EnumString, AsRefStr, EnumIter,
)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ChestMenuOption {
    #[default]
    Default,
    Disabled,
    Small,
    Medium,
    Large,
}

impl ChestMenuOption {
    /// Rows shown by the item menu, when the option picks a size.
    pub fn rows(self) -> Option<u32> {
        match self {
            Self::Small => Some(3),
            Self::Medium => Some(5),
            Self::Large => Some(6),
            Self::Default | Self::Disabled => None,
        }
    }
}

impl Inherit for RangeOption {
    fn is_inherit(&self) -> bool {
        *self == Self::Default
    }
}

impl Inherit for FeatureOption {
    fn is_inherit(&self) -> bool {
        *self == Self::Default
    }
}

impl Inherit for ChestMenuOption {
    fn is_inherit(&self) -> bool {
        *self == Self::Default
    }
}

impl Inherit for i32 {
    fn is_inherit(&self) -> bool {
        *self == 0
    }
}

impl Inherit for String {
    fn is_inherit(&self) -> bool {
        self.is_empty()
    }
}
