//! Runtime configuration structures and loaders.
use std::env;
use std::path::PathBuf;

use game_content::{ConfigLoader, LoadResult};
use game_core::GameConfig;

/// Configuration of the process hosting a [`GameSession`](crate::GameSession).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RuntimeConfig {
    /// Directory holding `{slot}.sav` files.
    pub save_data_dir: PathBuf,
    /// Slot used by "NEW GAME" and "LOAD GAME".
    pub save_slot: String,
    /// Seed for encounter rolls and generated names. `None` seeds from entropy.
    pub rng_seed: Option<u64>,
    /// Optional TOML file overriding [`GameConfig`] defaults.
    pub game_config_path: Option<PathBuf>,
}

impl RuntimeConfig {
    pub const DEFAULT_SAVE_SLOT: &'static str = "default";

    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `SAVE_DATA_DIR` - Directory for save files (default: platform data dir)
    /// - `GAME_SAVE_SLOT` - Save slot name (default: `default`)
    /// - `GAME_RNG_SEED` - Fixed RNG seed for reproducible runs (default: random)
    /// - `GAME_CONFIG_PATH` - TOML game rules file (default: built-in rules)
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(dir) = env::var("SAVE_DATA_DIR") {
            config.save_data_dir = PathBuf::from(dir);
        }

        if let Ok(slot) = env::var("GAME_SAVE_SLOT")
            && !slot.trim().is_empty()
        {
            config.save_slot = slot.trim().to_string();
        }

        config.rng_seed = read_env::<u64>("GAME_RNG_SEED");
        config.game_config_path = env::var("GAME_CONFIG_PATH").ok().map(PathBuf::from);

        config
    }

    /// Loads the game rules, falling back to defaults when no file is set.
    pub fn load_game_config(&self) -> LoadResult<GameConfig> {
        match &self.game_config_path {
            Some(path) => ConfigLoader::load(path),
            None => Ok(GameConfig::default()),
        }
    }
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            save_data_dir: default_save_dir(),
            save_slot: Self::DEFAULT_SAVE_SLOT.to_string(),
            rng_seed: None,
            game_config_path: None,
        }
    }
}

/// Platform data directory for saves.
///
/// - Linux: `~/.local/share/adventure/saves`
/// - macOS: `~/Library/Application Support/adventure/saves`
/// - Windows: `%APPDATA%\adventure\saves`
/// - Fallback: `./save_data`
pub fn default_save_dir() -> PathBuf {
    directories::ProjectDirs::from("", "", "adventure")
        .map(|dirs| dirs.data_dir().join("saves"))
        .unwrap_or_else(|| PathBuf::from("./save_data"))
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}
