//! Content factory for loading a whole data directory.

use std::path::{Path, PathBuf};

use anyhow::Context;
use game_core::{City, GameConfig, Item, Mission};

use crate::loaders::{CityLoader, ConfigLoader, ItemLoader, LoadResult, MissionLoader};

/// Content factory that loads all game content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── config.toml
/// ├── items.ron
/// ├── missions.ron
/// └── cities/
///     ├── pallet_town.ron
///     └── viridian_city.ron
/// ```
///
/// Missing files yield defaults (empty catalogs, default config).
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Load game configuration from `config.toml`.
    pub fn load_config(&self) -> LoadResult<GameConfig> {
        let path = self.data_dir.join("config.toml");
        if !path.exists() {
            return Ok(GameConfig::default());
        }
        ConfigLoader::load(&path)
    }

    /// Load item catalog from `items.ron`.
    pub fn load_items(&self) -> LoadResult<Vec<Item>> {
        let path = self.data_dir.join("items.ron");
        if !path.exists() {
            return Ok(Vec::new());
        }
        ItemLoader::load(&path)
    }

    /// Load mission catalog from `missions.ron`.
    pub fn load_missions(&self) -> LoadResult<Vec<Mission>> {
        let path = self.data_dir.join("missions.ron");
        if !path.exists() {
            return Ok(Vec::new());
        }
        MissionLoader::load(&path)
    }

    /// Load every `*.ron` file under `cities/`, sorted by file name.
    pub fn load_cities(&self) -> LoadResult<Vec<City>> {
        let dir = self.data_dir.join("cities");
        if !dir.is_dir() {
            return Ok(Vec::new());
        }

        let mut paths = std::fs::read_dir(&dir)
            .with_context(|| format!("Failed to list {}", dir.display()))?
            .map(|entry| entry.map(|entry| entry.path()))
            .collect::<Result<Vec<_>, _>>()
            .with_context(|| format!("Failed to list {}", dir.display()))?;
        paths.retain(|path| path.extension().is_some_and(|ext| ext == "ron"));
        paths.sort();

        let cities = paths
            .iter()
            .map(|path| CityLoader::load(path))
            .collect::<LoadResult<Vec<_>>>()?;

        if let Some((index, city)) = cities
            .iter()
            .enumerate()
            .find(|(index, city)| cities[..*index].iter().any(|other| other.name == city.name))
        {
            anyhow::bail!(
                "duplicate city '{}' in {}",
                city.name,
                paths[index].display()
            );
        }

        Ok(cities)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_files_fall_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let factory = ContentFactory::new(dir.path());

        assert_eq!(factory.load_config().unwrap(), GameConfig::default());
        assert!(factory.load_items().unwrap().is_empty());
        assert!(factory.load_missions().unwrap().is_empty());
        assert!(factory.load_cities().unwrap().is_empty());
    }

    #[test]
    fn cities_are_loaded_in_file_order() {
        let dir = tempfile::tempdir().unwrap();
        let cities = dir.path().join("cities");
        std::fs::create_dir(&cities).unwrap();
        std::fs::write(cities.join("b.ron"), r#"(name: "Beta", rows: ["."])"#).unwrap();
        std::fs::write(cities.join("a.ron"), r#"(name: "Alpha", rows: ["W"])"#).unwrap();
        std::fs::write(cities.join("notes.txt"), "ignored").unwrap();

        let loaded = ContentFactory::new(dir.path()).load_cities().unwrap();
        let names: Vec<_> = loaded.iter().map(|city| city.name.as_str()).collect();
        assert_eq!(names, ["Alpha", "Beta"]);
    }

    #[test]
    fn duplicate_city_names_are_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let cities = dir.path().join("cities");
        std::fs::create_dir(&cities).unwrap();
        std::fs::write(cities.join("a.ron"), r#"(name: "Same", rows: ["."])"#).unwrap();
        std::fs::write(cities.join("b.ron"), r#"(name: "Same", rows: ["."])"#).unwrap();

        assert!(ContentFactory::new(dir.path()).load_cities().is_err());
    }

    #[test]
    fn bundled_data_directory_loads() {
        let data = Path::new(env!("CARGO_MANIFEST_DIR")).join("data");
        let factory = ContentFactory::new(data);

        assert!(!factory.load_cities().unwrap().is_empty());
        assert!(!factory.load_items().unwrap().is_empty());
        assert!(!factory.load_missions().unwrap().is_empty());
        // The shipped config spells out the built-in defaults.
        assert_eq!(factory.load_config().unwrap(), GameConfig::default());
    }
}
