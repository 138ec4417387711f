//! Data-driven content definitions and loaders.
//!
//! This crate reads static game content from RON/TOML data files:
//! - City layouts (RON glyph grids)
//! - Item catalogs (RON)
//! - Mission catalogs (RON)
//! - Game configuration (TOML)
//!
//! Content is template data. The runtime copies what it needs into a session
//! and never writes back.

#[cfg(feature = "loaders")]
pub mod loaders;

#[cfg(feature = "loaders")]
pub use loaders::{
    CityLayout, CityLoader, ConfigLoader, ContentFactory, ItemLoader, LoadResult, MissionLoader,
};
