//! City layout loader.
//!
//! A city file names the city and draws its grid one row per string, top row
//! first:
//!
//! ```text
//! (
//!     name: "Pallet Town",
//!     rows: [
//!         "..W..",
//!         ".P.B.",
//!     ],
//! )
//! ```
//!
//! | glyph | tile                             |
//! |-------|----------------------------------|
//! | `.`   | plain tile                       |
//! | `W`   | wild encounters                  |
//! | `P`   | portal                           |
//! | `B`   | portal with wild encounters      |

use std::path::Path;

use anyhow::Context;
use game_core::{City, CityTile, TileFlags};
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

/// City layout structure for RON files.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CityLayout {
    pub name: String,
    pub rows: Vec<String>,
}

impl CityLayout {
    /// Converts the glyph grid into a [`City`].
    pub fn build(&self) -> LoadResult<City> {
        let rows = self
            .rows
            .iter()
            .enumerate()
            .map(|(y, row)| {
                row.chars()
                    .enumerate()
                    .map(|(x, glyph)| {
                        tile_flags(glyph).map(CityTile::with_flags).ok_or_else(|| {
                            anyhow::anyhow!("unknown tile glyph '{glyph}' at row {y}, column {x}")
                        })
                    })
                    .collect::<LoadResult<Vec<_>>>()
            })
            .collect::<LoadResult<Vec<_>>>()?;

        City::from_rows(self.name.clone(), rows)
            .with_context(|| format!("invalid layout for city '{}'", self.name))
    }
}

fn tile_flags(glyph: char) -> Option<TileFlags> {
    match glyph {
        '.' => Some(TileFlags::empty()),
        'W' => Some(TileFlags::WILD_ENCOUNTERS),
        'P' => Some(TileFlags::PORTAL),
        'B' => Some(TileFlags::PORTAL | TileFlags::WILD_ENCOUNTERS),
        _ => None,
    }
}

/// Loader for city layouts from RON files.
pub struct CityLoader;

impl CityLoader {
    /// Load a city from a RON file containing a [`CityLayout`].
    pub fn load(path: &Path) -> LoadResult<City> {
        let content = read_file(path)?;
        Self::from_str(&content).with_context(|| format!("in {}", path.display()))
    }

    /// Parse a city from RON text.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(content: &str) -> LoadResult<City> {
        let layout: CityLayout = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse city RON: {}", e))?;

        layout.build()
    }
}
