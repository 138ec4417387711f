//! Game configuration loader.

use std::path::Path;

use anyhow::Context;
use game_core::GameConfig;

use crate::loaders::{LoadResult, read_file};

/// Loader for game configuration from TOML files.
///
/// Missing tables and keys fall back to [`GameConfig::default`] values.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load config data from a TOML file.
    pub fn load(path: &Path) -> LoadResult<GameConfig> {
        let content = read_file(path)?;
        Self::from_str(&content).with_context(|| format!("in {}", path.display()))
    }

    /// Parse config data from TOML text.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(content: &str) -> LoadResult<GameConfig> {
        let config: GameConfig = toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse config TOML: {}", e))?;

        config.validate()?;

        Ok(config)
    }
}
