//! In-memory SaveRepository implementation for tests and local runs.

use std::collections::HashMap;
use std::sync::RwLock;

use game_core::SavedGameData;

use super::codec;
use super::traits::validate_slot;
use super::{RepositoryError, Result, SaveRepository};

/// In-memory implementation of [`SaveRepository`].
///
/// Slots hold the encoded bytes, so loads go through the same decoder and
/// validation as files do.
#[derive(Default)]
pub struct InMemorySaveRepository {
    slots: RwLock<HashMap<String, Vec<u8>>>,
}

impl InMemorySaveRepository {
    /// Create a new empty in-memory repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Raw bytes of a slot, as a file would contain them.
    pub fn raw(&self, slot: &str) -> Result<Option<Vec<u8>>> {
        let slots = self
            .slots
            .read()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        Ok(slots.get(slot).cloned())
    }

    /// Replaces the raw bytes of a slot without any checks.
    pub fn insert_raw(&self, slot: &str, bytes: Vec<u8>) -> Result<()> {
        validate_slot(slot)?;
        let mut slots = self
            .slots
            .write()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        slots.insert(slot.to_string(), bytes);
        Ok(())
    }
}

impl SaveRepository for InMemorySaveRepository {
    fn save(&self, slot: &str, snapshot: &SavedGameData) -> Result<()> {
        let bytes = codec::encode(snapshot)?;
        self.insert_raw(slot, bytes)
    }

    fn load(&self, slot: &str) -> Result<SavedGameData> {
        validate_slot(slot)?;
        let slots = self
            .slots
            .read()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        let bytes = slots
            .get(slot)
            .ok_or_else(|| RepositoryError::SlotNotFound(slot.to_string()))?;
        codec::decode(bytes)
    }

    fn exists(&self, slot: &str) -> bool {
        self.slots
            .read()
            .map(|slots| slots.contains_key(slot))
            .unwrap_or(false)
    }

    fn delete(&self, slot: &str) -> Result<()> {
        let mut slots = self
            .slots
            .write()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        slots.remove(slot);
        Ok(())
    }

    fn list_slots(&self) -> Result<Vec<String>> {
        let slots = self
            .slots
            .read()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        let mut names: Vec<String> = slots.keys().cloned().collect();
        names.sort_unstable();
        Ok(names)
    }
}
