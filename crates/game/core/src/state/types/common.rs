use std::fmt;

use uuid::Uuid;

/// Unique identifier for any game character.
///
/// Assigned once at creation and never reused or mutated; characters keep
/// their id across save/load.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct CharacterId(Uuid);

impl CharacterId {
    /// Allocates a fresh, random identifier.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Rebuilds an identifier from its raw value (e.g. when importing content).
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for CharacterId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for CharacterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A player's tile coordinates on the active city's grid.
///
/// Origin is the top-left tile; `tile_y` grows downward.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AdventureModeLocation {
    pub tile_x: i32,
    pub tile_y: i32,
}

impl AdventureModeLocation {
    pub const ORIGIN: Self = Self {
        tile_x: 0,
        tile_y: 0,
    };

    pub const fn new(tile_x: i32, tile_y: i32) -> Self {
        Self { tile_x, tile_y }
    }

    /// Location one step away in `direction`. Not bounds-checked.
    pub fn step(self, direction: Direction) -> Self {
        let (dx, dy) = direction.offset();
        Self {
            tile_x: self.tile_x.saturating_add(dx),
            tile_y: self.tile_y.saturating_add(dy),
        }
    }
}

impl fmt::Display for AdventureModeLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.tile_x, self.tile_y)
    }
}

/// Orthogonal movement direction on a city grid.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum Direction {
    North,
    South,
    East,
    West,
}

impl Direction {
    /// Returns the offset (dx, dy) for this direction.
    ///
    /// Coordinate system: origin top-left, Y-axis increases downward (south).
    pub const fn offset(self) -> (i32, i32) {
        match self {
            Direction::North => (0, -1),
            Direction::South => (0, 1),
            Direction::East => (1, 0),
            Direction::West => (-1, 0),
        }
    }
}
