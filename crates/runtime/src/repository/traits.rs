//! Repository contract for saving and loading snapshots.

use game_core::SavedGameData;

use super::{RepositoryError, Result};

/// Repository for saved games, addressed by slot name.
///
/// Slots are the persistence points of a campaign: nothing is written until
/// the session explicitly saves.
pub trait SaveRepository: Send + Sync {
    /// Save a snapshot, replacing whatever the slot held.
    fn save(&self, slot: &str, snapshot: &SavedGameData) -> Result<()>;

    /// Load the snapshot stored in a slot.
    ///
    /// Returns [`RepositoryError::SlotNotFound`] for empty slots.
    fn load(&self, slot: &str) -> Result<SavedGameData>;

    /// Check if a slot holds a snapshot
    fn exists(&self, slot: &str) -> bool;

    /// Delete a slot. Deleting an empty slot is not an error.
    fn delete(&self, slot: &str) -> Result<()>;

    /// List all occupied slots, sorted by name.
    fn list_slots(&self) -> Result<Vec<String>>;
}

/// Slot names double as file stems, so they are restricted to a portable
/// alphabet.
pub fn validate_slot(slot: &str) -> Result<()> {
    let valid = !slot.is_empty()
        && slot.len() <= 64
        && slot
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    if valid {
        Ok(())
    } else {
        Err(RepositoryError::InvalidSlot(slot.to_string()))
    }
}
