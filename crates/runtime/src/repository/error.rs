//! Error types raised by repository implementations.

use game_core::SnapshotError;
use thiserror::Error;

/// Errors surfaced by repository implementations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("save repository lock was poisoned")]
    LockPoisoned,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(String),

    /// The bytes are not a well-formed snapshot: bad magic, wrong length,
    /// checksum mismatch, undecodable payload or violated invariants.
    #[error("corrupted data: {0}")]
    CorruptedData(String),

    #[error("unsupported save format version {found} (supported: {supported})")]
    UnsupportedVersion { found: u16, supported: u16 },

    #[error("no saved game in slot '{0}'")]
    SlotNotFound(String),

    #[error("invalid slot name '{0}' (use letters, digits, '-' or '_')")]
    InvalidSlot(String),

    /// The in-memory snapshot violates its own invariants and was not written.
    #[error("refusing to save invalid snapshot")]
    InvalidSnapshot(#[source] SnapshotError),
}

pub type Result<T> = std::result::Result<T, RepositoryError>;
