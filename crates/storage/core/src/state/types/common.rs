use std::fmt;

macro_rules! entity_id {
    ($(#[$meta:meta])* $name:ident, $label:literal) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        pub struct $name(pub u32);

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!($label, "#{}"), self.0)
            }
        }
    };
}

entity_id!(
    /// Identifier of a location (a map area such as a farmhouse or a mine level).
    LocationId,
    "location"
);
entity_id!(
    /// Identifier of an object, placed or not.
    ObjectId,
    "object"
);
entity_id!(
    /// Identifier of a building standing in a location.
    BuildingId,
    "building"
);
entity_id!(
    /// Identifier of a player character.
    FarmerId,
    "farmer"
);

/// Discrete grid position expressed in tile coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tile {
    pub x: i32,
    pub y: i32,
}

impl Tile {
    pub const ORIGIN: Self = Self { x: 0, y: 0 };

    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Chebyshev distance: the number of king moves between two tiles.
    pub fn chebyshev_distance(self, other: Tile) -> u32 {
        let dx = self.x.abs_diff(other.x);
        let dy = self.y.abs_diff(other.y);
        dx.max(dy)
    }
}

impl Default for Tile {
    fn default() -> Self {
        Self::ORIGIN
    }
}

impl fmt::Display for Tile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chebyshev_distance_takes_the_larger_axis() {
        let origin = Tile::new(10, 10);
        assert_eq!(origin.chebyshev_distance(origin), 0);
        assert_eq!(origin.chebyshev_distance(Tile::new(11, 10)), 1);
        assert_eq!(origin.chebyshev_distance(Tile::new(13, 8)), 3);
        assert_eq!(origin.chebyshev_distance(Tile::new(-2, 10)), 12);
    }

    #[test]
    fn ids_display_with_their_kind() {
        assert_eq!(ObjectId(7).to_string(), "object#7");
        assert_eq!(FarmerId(1).to_string(), "farmer#1");
    }
}
