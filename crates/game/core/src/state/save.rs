//! Saved game snapshot.
//!
//! [`SavedGameData`] is the unit of persistence: everything needed to resume
//! a session. It must survive serialization without loss, which is why the
//! player's experience and currency are decimals rather than floats.

use std::fmt;

use rust_decimal::Decimal;

use crate::config::GameConfig;
use crate::state::{CharacterId, CharacterKind, GameCharacter, Player, SnapshotError};

/// Tuning passed to the narrative text generator.
///
/// The core only stores these values; it never calls a generator itself.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GenerationConfig {
    pub temperature: f64,
    pub top_p: f64,
    pub top_k: f64,
    pub max_output_tokens: u32,
}

impl GenerationConfig {
    pub const DEFAULT_TEMPERATURE: f64 = 1.0;
    pub const DEFAULT_TOP_P: f64 = 0.95;
    pub const DEFAULT_TOP_K: f64 = 64.0;
    pub const DEFAULT_MAX_OUTPUT_TOKENS: u32 = 8192;

    fn validate(&self) -> Result<(), SnapshotError> {
        for (field, value) in [
            ("temperature", self.temperature),
            ("top_p", self.top_p),
            ("top_k", self.top_k),
        ] {
            if !value.is_finite() {
                return Err(SnapshotError::NonFiniteSetting { field });
            }
        }
        Ok(())
    }
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            temperature: Self::DEFAULT_TEMPERATURE,
            top_p: Self::DEFAULT_TOP_P,
            top_k: Self::DEFAULT_TOP_K,
            max_output_tokens: Self::DEFAULT_MAX_OUTPUT_TOKENS,
        }
    }
}

/// The human player's character as stored in a snapshot.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlayerCharacter {
    pub id: CharacterId,
    pub name: String,
    pub player: Player,
}

impl PlayerCharacter {
    pub fn new(name: impl Into<String>, player: Player) -> Self {
        Self {
            id: CharacterId::new(),
            name: name.into(),
            player,
        }
    }

    /// Builds the [`GameCharacter`] view of this player.
    pub fn to_character(&self) -> GameCharacter {
        GameCharacter::with_id(
            self.id,
            self.name.clone(),
            CharacterKind::Player(self.player.clone()),
        )
    }

    fn validate(&self) -> Result<(), SnapshotError> {
        let player = &self.player;
        let invalid = |reason| Err(SnapshotError::InvalidPlayer { reason });

        if player.level < GameConfig::STARTING_LEVEL {
            return invalid("level must be at least 1");
        }
        if player.exp < Decimal::ZERO {
            return invalid("experience must not be negative");
        }
        if player.required_exp <= Decimal::ZERO {
            return invalid("required experience must be positive");
        }
        if player.exp >= player.required_exp {
            return invalid("experience must be below the level-up threshold");
        }
        if player.currency < Decimal::ZERO {
            return invalid("currency must not be negative");
        }
        if player.inventory.iter().any(|item| item.cost() < Decimal::ZERO) {
            return invalid("item costs must not be negative");
        }
        Ok(())
    }
}

impl TryFrom<GameCharacter> for PlayerCharacter {
    type Error = SnapshotError;

    fn try_from(character: GameCharacter) -> Result<Self, Self::Error> {
        let id = character.id();
        match character.kind {
            CharacterKind::Player(player) => Ok(Self {
                id,
                name: character.name,
                player,
            }),
            other => Err(SnapshotError::NotAPlayer {
                name: character.name,
                kind: other.as_str(),
            }),
        }
    }
}

/// Complete persisted state of a campaign.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SavedGameData {
    pub trainer_name: String,
    pub generation: GenerationConfig,
    pub player_data: PlayerCharacter,
}

impl SavedGameData {
    /// Builds a snapshot from a character, which must be a human player.
    pub fn new(
        trainer_name: impl Into<String>,
        generation: GenerationConfig,
        player_data: GameCharacter,
    ) -> Result<Self, SnapshotError> {
        let data = Self {
            trainer_name: trainer_name.into(),
            generation,
            player_data: PlayerCharacter::try_from(player_data)?,
        };
        data.validate()?;
        Ok(data)
    }

    /// Fresh snapshot for a "NEW GAME": a level 1 player named after the trainer.
    pub fn new_game(trainer_name: impl Into<String>, config: &GameConfig) -> Self {
        let trainer_name = trainer_name.into();
        let player = Player::new(&config.progression, config.starting_stats);
        Self {
            player_data: PlayerCharacter::new(trainer_name.clone(), player),
            trainer_name,
            generation: GenerationConfig::default(),
        }
    }

    pub fn player(&self) -> &Player {
        &self.player_data.player
    }

    pub fn player_mut(&mut self) -> &mut Player {
        &mut self.player_data.player
    }

    pub fn player_id(&self) -> CharacterId {
        self.player_data.id
    }

    /// Checks every invariant a loaded snapshot must satisfy.
    pub fn validate(&self) -> Result<(), SnapshotError> {
        self.generation.validate()?;
        self.player_data.validate()
    }
}

impl fmt::Display for SavedGameData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.trainer_name.to_uppercase())?;
        writeln!(f, "Temperature: {}", self.generation.temperature)?;
        writeln!(f, "Top P: {}", self.generation.top_p)?;
        writeln!(f, "Top K: {}", self.generation.top_k)?;
        writeln!(f, "Max output tokens: {}", self.generation.max_output_tokens)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{CombatStats, Npc};

    #[test]
    fn new_game_snapshot_is_valid() {
        let data = SavedGameData::new_game("Ash", &GameConfig::default());
        assert_eq!(data.player_data.name, "Ash");
        assert_eq!(data.player().level(), 1);
        assert_eq!(data.validate(), Ok(()));
    }

    #[test]
    fn only_human_players_can_be_saved() {
        let npc = GameCharacter::npc("Shopkeeper", Npc::new());
        let err = SavedGameData::new("Ash", GenerationConfig::default(), npc).unwrap_err();
        assert_eq!(
            err,
            SnapshotError::NotAPlayer {
                name: "Shopkeeper".to_string(),
                kind: "npc"
            }
        );
    }

    #[test]
    fn player_id_survives_conversion() {
        let character = GameCharacter::player(
            "Misty",
            Player::new(&Default::default(), CombatStats::default()),
        );
        let id = character.id();
        let data = SavedGameData::new("Misty", GenerationConfig::default(), character).unwrap();
        assert_eq!(data.player_id(), id);
        assert_eq!(data.player_data.to_character().id(), id);
    }

    #[test]
    fn non_finite_generation_settings_are_invalid() {
        let mut data = SavedGameData::new_game("Ash", &GameConfig::default());
        data.generation.top_p = f64::NAN;
        assert_eq!(
            data.validate(),
            Err(SnapshotError::NonFiniteSetting { field: "top_p" })
        );
    }

    #[test]
    fn display_lists_generation_settings() {
        let data = SavedGameData::new_game("Ash", &GameConfig::default());
        let text = data.to_string();
        assert!(text.starts_with("ASH\n"));
        assert!(text.contains("Top K: 64"));
        assert!(text.contains("Max output tokens: 8192"));
    }
}
