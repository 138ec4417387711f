//! Content loaders for reading game data from files.
//!
//! Every loader offers `from_str` (parse already-read text) and `load`
//! (read a file, then parse). Errors carry the offending path.

pub mod city;
pub mod config;
pub mod factory;
pub mod item;
pub mod mission;

pub use city::{CityLayout, CityLoader};
pub use config::ConfigLoader;
pub use factory::ContentFactory;
pub use item::ItemLoader;
pub use mission::MissionLoader;

use std::path::Path;

use anyhow::Context;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path).with_context(|| format!("Failed to read file {}", path.display()))
}
