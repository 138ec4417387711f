//! Authoritative game state representation.
//!
//! This module owns the data structures that describe characters, their
//! progression, the city grids they stand on, and the persisted snapshot.
//! Everything here is plain data with value semantics: clone to copy, pass by
//! reference to share.
pub mod error;
pub mod save;
pub mod types;

pub use error::{ProgressionError, SnapshotError, WorldError};
pub use save::{GenerationConfig, PlayerCharacter, SavedGameData};
pub use types::{
    AdventureModeLocation, CharacterId, CharacterKind, City, CityTile, CombatStats, Direction,
    GameCharacter, Item, LevelUp, Mission, Npc, Player, Reward, TileFlags,
};
