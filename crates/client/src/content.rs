//! Static game content bundle loaded at startup.
use std::path::PathBuf;

use anyhow::{Result, bail};
use game_content::ContentFactory;
use game_core::{City, GameConfig, Item, Mission};
use runtime::RuntimeConfig;

/// Everything the client reads from the data directory.
#[derive(Clone, Debug)]
pub struct GameContent {
    pub config: GameConfig,
    pub cities: Vec<City>,
    pub items: Vec<Item>,
    pub missions: Vec<Mission>,
}

impl GameContent {
    /// Loads content from the data directory.
    ///
    /// `GAME_CONFIG_PATH` overrides the bundled `config.toml`.
    pub fn load(runtime: &RuntimeConfig) -> Result<Self> {
        let factory = ContentFactory::new(data_dir());

        let config = if runtime.game_config_path.is_some() {
            runtime.load_game_config()?
        } else {
            factory.load_config()?
        };
        let cities = factory.load_cities()?;
        if cities.is_empty() {
            bail!("no cities found under {}", factory.data_dir().display());
        }
        let items = factory.load_items()?;
        let missions = factory.load_missions()?;

        tracing::info!(
            data_dir = %factory.data_dir().display(),
            cities = cities.len(),
            items = items.len(),
            missions = missions.len(),
            "game content loaded"
        );

        Ok(Self {
            config,
            cities,
            items,
            missions,
        })
    }
}

/// Resolves the content data directory.
///
/// Tried in order:
/// 1. `CONTENT_DATA_DIR` environment variable
/// 2. Relative to the executable (`target/<profile>/adventure` in a checkout)
/// 3. Relative to the current directory
fn data_dir() -> PathBuf {
    const RELATIVE: &str = "crates/game/content/data";

    if let Ok(dir) = std::env::var("CONTENT_DATA_DIR") {
        return PathBuf::from(dir);
    }

    std::env::current_exe()
        .ok()
        .and_then(|exe| {
            exe.parent()
                .and_then(|p| p.parent())
                .and_then(|p| p.parent())
                .map(|root| root.join(RELATIVE))
        })
        .filter(|dir| dir.is_dir())
        .unwrap_or_else(|| PathBuf::from(RELATIVE))
}
