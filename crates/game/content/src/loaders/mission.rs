//! Mission catalog loader.

use std::collections::HashSet;
use std::path::Path;

use anyhow::Context;
use game_core::Mission;
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

/// Mission catalog structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MissionCatalog {
    pub missions: Vec<Mission>,
}

/// Loader for mission templates from RON files.
pub struct MissionLoader;

impl MissionLoader {
    pub fn load(path: &Path) -> LoadResult<Vec<Mission>> {
        let content = read_file(path)?;
        Self::from_str(&content).with_context(|| format!("in {}", path.display()))
    }

    #[allow(clippy::should_implement_trait)]
    pub fn from_str(content: &str) -> LoadResult<Vec<Mission>> {
        let catalog: MissionCatalog = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse mission catalog RON: {}", e))?;

        // Completion is tracked by name.
        let mut seen = HashSet::new();
        if let Some(mission) = catalog
            .missions
            .iter()
            .find(|mission| !seen.insert(mission.name.as_str()))
        {
            anyhow::bail!("duplicate mission '{}'", mission.name);
        }

        Ok(catalog.missions)
    }
}
