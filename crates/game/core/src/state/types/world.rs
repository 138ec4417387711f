//! City grids and their tiles.
//!
//! A [`City`] is a fixed-size rectangular grid of [`CityTile`]s addressed by
//! `(x, y)` with the origin at the top-left. Tiles record which characters
//! stand on them (by id, in arrival order) but do not own the characters.

use bitflags::bitflags;

use crate::state::WorldError;

use super::{AdventureModeLocation, CharacterId};

bitflags! {
    /// Static behaviour flags of a tile.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct TileFlags: u8 {
        /// Stepping here leads to another city.
        const PORTAL = 0b0000_0001;
        /// Movement logic may roll for a wild battle here.
        const WILD_ENCOUNTERS = 0b0000_0010;
    }
}

/// One addressable cell of a city grid.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CityTile {
    occupants: Vec<CharacterId>,
    flags: TileFlags,
}

impl CityTile {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_flags(flags: TileFlags) -> Self {
        Self {
            occupants: Vec::new(),
            flags,
        }
    }

    pub fn flags(&self) -> TileFlags {
        self.flags
    }

    pub fn is_portal(&self) -> bool {
        self.flags.contains(TileFlags::PORTAL)
    }

    /// Whether movement logic may trigger a wild battle here.
    ///
    /// The grid never starts combat itself.
    pub fn can_encounter_wild_battles(&self) -> bool {
        self.flags.contains(TileFlags::WILD_ENCOUNTERS)
    }

    pub fn set_portal(&mut self, enabled: bool) {
        self.flags.set(TileFlags::PORTAL, enabled);
    }

    pub fn set_can_encounter_wild_battles(&mut self, enabled: bool) {
        self.flags.set(TileFlags::WILD_ENCOUNTERS, enabled);
    }

    /// Occupants in arrival order.
    pub fn characters(&self) -> &[CharacterId] {
        &self.occupants
    }

    pub fn contains(&self, character: CharacterId) -> bool {
        self.occupants.contains(&character)
    }

    pub fn is_occupied(&self) -> bool {
        !self.occupants.is_empty()
    }

    /// Appends `character` to the occupant list.
    ///
    /// Adding an id that is already present produces a duplicate entry;
    /// callers that need set semantics de-duplicate themselves.
    pub fn add_character(&mut self, character: CharacterId) {
        self.occupants.push(character);
    }

    /// Removes the first occurrence of `character`, preserving the order of
    /// the remaining occupants. Returns whether anything was removed.
    pub fn remove_character(&mut self, character: CharacterId) -> bool {
        match self.occupants.iter().position(|occupant| *occupant == character) {
            Some(index) => {
                self.occupants.remove(index);
                true
            }
            None => false,
        }
    }

    /// Removes every occurrence of `character`, returning how many were removed.
    pub fn evict(&mut self, character: CharacterId) -> usize {
        let before = self.occupants.len();
        self.occupants.retain(|occupant| *occupant != character);
        before - self.occupants.len()
    }
}

/// A named city with a fixed rectangular grid of tiles.
///
/// Grid dimensions are fixed at construction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct City {
    pub name: String,
    tiles: Vec<Vec<CityTile>>,
}

impl City {
    /// Longest allowed side, in tiles. Keeps every coordinate within `i32`.
    pub const MAX_SIDE: usize = 4096;

    /// Creates a city of plain tiles.
    pub fn new(name: impl Into<String>, width: usize, height: usize) -> Result<Self, WorldError> {
        Self::check_size(width, height)?;
        let rows = (0..height)
            .map(|_| vec![CityTile::default(); width])
            .collect();
        Self::from_rows(name, rows)
    }

    /// Creates a city from explicit rows (`rows[y][x]`).
    ///
    /// Rejects empty grids and rows whose length differs from the first row.
    pub fn from_rows(name: impl Into<String>, rows: Vec<Vec<CityTile>>) -> Result<Self, WorldError> {
        let width = rows.first().map_or(0, Vec::len);
        if width == 0 {
            return Err(WorldError::EmptyGrid);
        }
        Self::check_size(width, rows.len())?;
        if let Some((row, tiles)) = rows
            .iter()
            .enumerate()
            .find(|(_, tiles)| tiles.len() != width)
        {
            return Err(WorldError::RaggedGrid {
                row,
                expected: width,
                found: tiles.len(),
            });
        }

        Ok(Self {
            name: name.into(),
            tiles: rows,
        })
    }

    /// Number of columns (length of the first row).
    pub fn width(&self) -> usize {
        self.tiles.first().map_or(0, Vec::len)
    }

    /// Number of rows.
    pub fn height(&self) -> usize {
        self.tiles.len()
    }

    pub fn contains(&self, x: i32, y: i32) -> bool {
        self.index(x, y).is_some()
    }

    /// Tile at `(x, y)`, or `None` when the coordinates fall outside the grid.
    pub fn tile(&self, x: i32, y: i32) -> Option<&CityTile> {
        let (column, row) = self.index(x, y)?;
        self.tiles.get(row)?.get(column)
    }

    pub fn tile_mut(&mut self, x: i32, y: i32) -> Option<&mut CityTile> {
        let (column, row) = self.index(x, y)?;
        self.tiles.get_mut(row)?.get_mut(column)
    }

    pub fn tile_at(&self, location: AdventureModeLocation) -> Option<&CityTile> {
        self.tile(location.tile_x, location.tile_y)
    }

    /// Iterates over all tiles with their coordinates, row by row.
    pub fn tiles(&self) -> impl Iterator<Item = (AdventureModeLocation, &CityTile)> + '_ {
        // Sides never exceed MAX_SIDE, so both indices fit in i32.
        self.tiles.iter().enumerate().flat_map(|(y, row)| {
            row.iter().enumerate().map(move |(x, tile)| {
                (AdventureModeLocation::new(x as i32, y as i32), tile)
            })
        })
    }

    /// Locations of every portal tile.
    pub fn portals(&self) -> Vec<AdventureModeLocation> {
        self.tiles()
            .filter(|(_, tile)| tile.is_portal())
            .map(|(location, _)| location)
            .collect()
    }

    /// Appends `character` to the tile at `location`.
    pub fn place_character(
        &mut self,
        location: AdventureModeLocation,
        character: CharacterId,
    ) -> Result<(), WorldError> {
        self.checked_tile_mut(location)?.add_character(character);
        Ok(())
    }

    /// Removes the first occurrence of `character` from the tile at `location`.
    pub fn remove_character(
        &mut self,
        location: AdventureModeLocation,
        character: CharacterId,
    ) -> Result<bool, WorldError> {
        Ok(self.checked_tile_mut(location)?.remove_character(character))
    }

    /// Moves `character` between tiles.
    ///
    /// Both locations are validated before anything changes. Returns
    /// `WorldError::NotOnTile` if the character was not standing on `from`.
    pub fn move_character(
        &mut self,
        character: CharacterId,
        from: AdventureModeLocation,
        to: AdventureModeLocation,
    ) -> Result<(), WorldError> {
        if !self.contains(to.tile_x, to.tile_y) {
            return Err(self.out_of_bounds(to));
        }
        if !self.remove_character(from, character)? {
            return Err(WorldError::NotOnTile {
                character,
                location: from,
            });
        }
        self.place_character(to, character)
    }

    /// First location (row-major) holding `character`.
    pub fn locate(&self, character: CharacterId) -> Option<AdventureModeLocation> {
        self.tiles()
            .find(|(_, tile)| tile.contains(character))
            .map(|(location, _)| location)
    }

    /// Removes `character` from every tile; returns the number of entries removed.
    pub fn evict_everywhere(&mut self, character: CharacterId) -> usize {
        self.tiles
            .iter_mut()
            .flat_map(|row| row.iter_mut())
            .map(|tile| tile.evict(character))
            .sum()
    }

    fn check_size(width: usize, height: usize) -> Result<(), WorldError> {
        if width > Self::MAX_SIDE || height > Self::MAX_SIDE {
            return Err(WorldError::GridTooLarge {
                width,
                height,
                max: Self::MAX_SIDE,
            });
        }
        Ok(())
    }

    fn index(&self, x: i32, y: i32) -> Option<(usize, usize)> {
        let column = usize::try_from(x).ok()?;
        let row = usize::try_from(y).ok()?;
        (column < self.width() && row < self.height()).then_some((column, row))
    }

    fn checked_tile_mut(
        &mut self,
        location: AdventureModeLocation,
    ) -> Result<&mut CityTile, WorldError> {
        let error = self.out_of_bounds(location);
        self.tile_mut(location.tile_x, location.tile_y).ok_or(error)
    }

    fn out_of_bounds(&self, location: AdventureModeLocation) -> WorldError {
        WorldError::OutOfBounds {
            location,
            width: self.width(),
            height: self.height(),
        }
    }
}
