//! Item catalog loader.

use std::collections::HashSet;
use std::path::Path;

use anyhow::Context;
use game_core::Item;
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

/// Item catalog structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemCatalog {
    pub items: Vec<Item>,
}

/// Loader for item catalog from RON files.
pub struct ItemLoader;

impl ItemLoader {
    /// Load item catalog from a RON file.
    pub fn load(path: &Path) -> LoadResult<Vec<Item>> {
        let content = read_file(path)?;
        Self::from_str(&content).with_context(|| format!("in {}", path.display()))
    }

    /// Parse an item catalog from RON text. Item names must be unique.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(content: &str) -> LoadResult<Vec<Item>> {
        let catalog: ItemCatalog = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse item catalog RON: {}", e))?;

        let mut seen = HashSet::new();
        if let Some(item) = catalog.items.iter().find(|item| !seen.insert(item.name())) {
            anyhow::bail!("duplicate item '{}'", item.name());
        }

        Ok(catalog.items)
    }
}
