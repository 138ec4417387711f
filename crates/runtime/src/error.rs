//! Unified error type surfaced by the session API.
//!
//! Wraps failures from the rules crate and the repositories so clients can
//! bubble them up with consistent context.

use game_core::{
    BattleError, CharacterId, ErrorSeverity, GameError, ProgressionError, SnapshotError,
    WorldError,
};
use thiserror::Error;

pub use crate::repository::RepositoryError;

pub type Result<T> = std::result::Result<T, SessionError>;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    World(#[from] WorldError),

    #[error(transparent)]
    Battle(#[from] BattleError),

    #[error(transparent)]
    Progression(#[from] ProgressionError),

    #[error(transparent)]
    Snapshot(#[from] SnapshotError),

    #[error(transparent)]
    Repository(#[from] RepositoryError),

    #[error("the player is not in a city")]
    NotInCity,

    #[error("a city named '{name}' already exists")]
    DuplicateCity { name: String },

    #[error("no character with id {id}")]
    UnknownCharacter { id: CharacterId },

    #[error("character '{name}' is a {kind}, expected {expected}")]
    WrongCharacterKind {
        name: String,
        kind: &'static str,
        expected: &'static str,
    },

    #[error("the human player cannot be despawned")]
    CannotDespawnPlayer,

    #[error("battle does not involve the human player as player 1")]
    ForeignBattle,
}

impl SessionError {
    /// Severity of the underlying failure.
    ///
    /// Repository errors are recoverable: the caller can pick another slot or
    /// retry after fixing the disk.
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            SessionError::World(e) => e.severity(),
            SessionError::Battle(e) => e.severity(),
            SessionError::Progression(e) => e.severity(),
            SessionError::Snapshot(e) => e.severity(),
            SessionError::Repository(_) => ErrorSeverity::Recoverable,
            SessionError::NotInCity
            | SessionError::DuplicateCity { .. }
            | SessionError::UnknownCharacter { .. }
            | SessionError::WrongCharacterKind { .. }
            | SessionError::CannotDespawnPlayer
            | SessionError::ForeignBattle => ErrorSeverity::Validation,
        }
    }
}
