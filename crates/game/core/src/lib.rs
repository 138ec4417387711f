//! Deterministic game rules and data types shared across the workspace.
//!
//! `game-core` defines the canonical rules (element matchups, battles,
//! progression, city grids) and the persisted snapshot type. It performs no
//! I/O and never logs: the runtime drives it and reports what happened.
pub mod action;
pub mod combat;
pub mod config;
pub mod error;
pub mod state;

pub use action::{Action, ActionParseError, SkillEffect, SkillKind};
pub use combat::{
    ActionCancelled, ActionEffect, ActionOutcome, ActionProvider, ActionRequest, Battle,
    BattleError, BattleMode, BattleState, Combatant, Damage, ElementType, Multiplier, Side,
    TurnReport,
};
pub use config::{BattleRules, ConfigError, EncounterRules, GameConfig, ProgressionRules};
pub use error::{ErrorSeverity, GameError};
pub use state::{
    AdventureModeLocation, CharacterId, CharacterKind, City, CityTile, CombatStats, Direction,
    GameCharacter, GenerationConfig, Item, LevelUp, Mission, Npc, Player, PlayerCharacter,
    ProgressionError, Reward, SavedGameData, SnapshotError, TileFlags, WorldError,
};
