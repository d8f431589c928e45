use std::collections::BTreeSet;

use crate::options::RangeOption;
use crate::state::{FarmerId, LocationId, LocationState, Tile};

/// Proximity evaluation mode derived from a range option and a distance.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RangeMode {
    Never,
    /// Only storages carried by the reference farmer.
    Inventory,
    SameLocation,
    /// Same location and within this many tiles (Chebyshev).
    Radius(u32),
    Unrestricted,
}

impl RangeMode {
    /// `Default` and `Disabled` never match. `Location` with a negative
    /// distance covers the whole location.
    pub fn from_option(option: RangeOption, distance: i32) -> Self {
        match option {
            RangeOption::Default | RangeOption::Disabled => Self::Never,
            RangeOption::Inventory => Self::Inventory,
            RangeOption::Location if distance < 0 => Self::SameLocation,
            RangeOption::Location => Self::Radius(distance.unsigned_abs()),
            RangeOption::World => Self::Unrestricted,
        }
    }

    pub fn within(self, reference: &RangeReference, candidate: &Reach) -> bool {
        match self {
            Self::Never => false,
            Self::Inventory => {
                candidate.carrier.is_some() && candidate.carrier == reference.farmer
            }
            Self::SameLocation => candidate.location == reference.location,
            Self::Radius(distance) => {
                candidate.location == reference.location
                    && candidate.tile.chebyshev_distance(reference.tile) <= distance
            }
            Self::Unrestricted => true,
        }
    }
}

/// The point a range is measured from: usually a farmer or a workbench.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RangeReference {
    pub farmer: Option<FarmerId>,
    pub location: LocationId,
    pub tile: Tile,
}

/// Where a candidate storage physically is.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Reach {
    pub location: LocationId,
    pub tile: Tile,
    /// Farmer carrying the storage, if it sits in someone's inventory.
    pub carrier: Option<FarmerId>,
}

/// Location names a feature is switched off in.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LocationExclusions {
    names: BTreeSet<String>,
}

impl LocationExclusions {
    /// Key standing for every level of the underground mine.
    pub const UNDERGROUND_MINE: &'static str = "UndergroundMine";

    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            names: names.into_iter().map(Into::into).collect(),
        }
    }

    pub fn excludes(&self, location: &LocationState) -> bool {
        self.names.contains(&location.name)
            || (location.is_mine_shaft() && self.names.contains(Self::UNDERGROUND_MINE))
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}
