//! Battle errors.

use crate::error::{ErrorSeverity, GameError};
use crate::state::CharacterId;

use super::battle::BattleState;

/// Contract violations when building or resolving a battle.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum BattleError {
    /// Both sides reference the same character.
    #[error("character {character} cannot battle itself")]
    InvalidParticipants { character: CharacterId },

    /// The battle already reached a terminal state.
    #[error("battle already ended ({state})")]
    BattleAlreadyEnded { state: BattleState },

    /// The character has no combat payload (NPCs do not fight).
    #[error("character {character} cannot take part in battles")]
    NotACombatant { character: CharacterId },
}

impl GameError for BattleError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            BattleError::InvalidParticipants { .. } => "BATTLE_INVALID_PARTICIPANTS",
            BattleError::BattleAlreadyEnded { .. } => "BATTLE_ALREADY_ENDED",
            BattleError::NotACombatant { .. } => "BATTLE_NOT_A_COMBATANT",
        }
    }
}
