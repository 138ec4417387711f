pub mod character;
pub mod common;
pub mod item;
pub mod player;
pub mod world;

// Re-export character types
pub use character::{CharacterKind, CombatStats, GameCharacter, Npc};

// Re-export common types
pub use common::{AdventureModeLocation, CharacterId, Direction};

// Re-export item types
pub use item::{Item, Mission, Reward};

// Re-export player progression
pub use player::{LevelUp, Player};

// Re-export world grid types
pub use world::{City, CityTile, TileFlags};
