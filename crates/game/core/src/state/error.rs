//! State management errors.
//!
//! Errors related to the world grid, player progression, and snapshot
//! validation.

use rust_decimal::Decimal;

use crate::error::{ErrorSeverity, GameError};
use crate::state::{AdventureModeLocation, CharacterId};

/// Errors raised by city grid operations.
///
/// Plain lookups never produce these: [`City::tile`](crate::City::tile)
/// returns `None` for out-of-range coordinates.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum WorldError {
    /// Location is outside the city grid.
    #[error("location {location} is out of bounds (grid size: {width}x{height})")]
    OutOfBounds {
        location: AdventureModeLocation,
        width: usize,
        height: usize,
    },

    /// A city needs at least one row and one column.
    #[error("city grid must have at least one tile")]
    EmptyGrid,

    /// A side of the grid is longer than [`City::MAX_SIDE`](crate::City::MAX_SIDE).
    #[error("city grid {width}x{height} exceeds the {max} tile limit per side")]
    GridTooLarge {
        width: usize,
        height: usize,
        max: usize,
    },

    /// Row length differs from the first row.
    #[error("row {row} has {found} tiles, expected {expected}")]
    RaggedGrid {
        row: usize,
        expected: usize,
        found: usize,
    },

    /// The character is not standing where the caller expected.
    #[error("character {character} is not on tile {location}")]
    NotOnTile {
        character: CharacterId,
        location: AdventureModeLocation,
    },

    /// No city with this name is registered.
    #[error("unknown city '{name}'")]
    UnknownCity { name: String },
}

impl GameError for WorldError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            WorldError::OutOfBounds { .. } | WorldError::UnknownCity { .. } => {
                ErrorSeverity::Recoverable
            }
            WorldError::EmptyGrid
            | WorldError::GridTooLarge { .. }
            | WorldError::RaggedGrid { .. } => ErrorSeverity::Validation,
            WorldError::NotOnTile { .. } => ErrorSeverity::Internal,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            WorldError::OutOfBounds { .. } => "WORLD_OUT_OF_BOUNDS",
            WorldError::EmptyGrid => "WORLD_EMPTY_GRID",
            WorldError::GridTooLarge { .. } => "WORLD_GRID_TOO_LARGE",
            WorldError::RaggedGrid { .. } => "WORLD_RAGGED_GRID",
            WorldError::NotOnTile { .. } => "WORLD_NOT_ON_TILE",
            WorldError::UnknownCity { .. } => "WORLD_UNKNOWN_CITY",
        }
    }
}

/// Errors raised while changing experience, currency, or inventory.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ProgressionError {
    #[error("amount must not be negative (got {amount})")]
    NegativeAmount { amount: Decimal },

    #[error("insufficient funds: cost {cost}, balance {balance}")]
    InsufficientFunds { cost: Decimal, balance: Decimal },

    #[error("mission '{name}' was already completed")]
    MissionAlreadyCompleted { name: String },

    #[error("invalid progression rules: {reason}")]
    InvalidRules { reason: &'static str },

    #[error("decimal overflow while updating progression")]
    Overflow,
}

impl GameError for ProgressionError {
    fn severity(&self) -> ErrorSeverity {
        use ProgressionError::*;
        match self {
            InsufficientFunds { .. } => ErrorSeverity::Recoverable,
            NegativeAmount { .. } | MissionAlreadyCompleted { .. } | InvalidRules { .. } => {
                ErrorSeverity::Validation
            }
            Overflow => ErrorSeverity::Internal,
        }
    }

    fn error_code(&self) -> &'static str {
        use ProgressionError::*;
        match self {
            NegativeAmount { .. } => "PROGRESSION_NEGATIVE_AMOUNT",
            InsufficientFunds { .. } => "PROGRESSION_INSUFFICIENT_FUNDS",
            MissionAlreadyCompleted { .. } => "PROGRESSION_MISSION_ALREADY_COMPLETED",
            InvalidRules { .. } => "PROGRESSION_INVALID_RULES",
            Overflow => "PROGRESSION_OVERFLOW",
        }
    }
}

/// Invariant violations found while building or validating a snapshot.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum SnapshotError {
    #[error("saved character '{name}' is a {kind}, not a player")]
    NotAPlayer { name: String, kind: &'static str },

    #[error("invalid player state: {reason}")]
    InvalidPlayer { reason: &'static str },

    #[error("generation setting '{field}' is not a finite number")]
    NonFiniteSetting { field: &'static str },
}

impl GameError for SnapshotError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            SnapshotError::NotAPlayer { .. } => "SNAPSHOT_NOT_A_PLAYER",
            SnapshotError::InvalidPlayer { .. } => "SNAPSHOT_INVALID_PLAYER",
            SnapshotError::NonFiniteSetting { .. } => "SNAPSHOT_NON_FINITE_SETTING",
        }
    }
}
