//! File-based persistence.

use std::fs;
use std::path::{Path, PathBuf};

use game_core::SavedGameData;

use super::codec;
use super::traits::validate_slot;
use super::{RepositoryError, Result, SaveRepository};

const EXTENSION: &str = "sav";

/// Saves a snapshot to `destination`.
///
/// The bytes go to a sibling temp file first and are renamed into place, so
/// a crash never leaves a half-written save behind.
pub fn save(snapshot: &SavedGameData, destination: impl AsRef<Path>) -> Result<()> {
    let destination = destination.as_ref();
    let bytes = codec::encode(snapshot)?;

    let mut temp_name = destination.as_os_str().to_owned();
    temp_name.push(".tmp");
    let temp_path = PathBuf::from(temp_name);

    if let Err(error) =
        fs::write(&temp_path, &bytes).and_then(|()| fs::rename(&temp_path, destination))
    {
        if let Err(cleanup) = fs::remove_file(&temp_path) {
            tracing::debug!(path = %temp_path.display(), error = %cleanup, "temp file not removed");
        }
        return Err(error.into());
    }

    tracing::debug!(
        path = %destination.display(),
        bytes = bytes.len(),
        "saved game snapshot"
    );
    Ok(())
}

/// Loads a snapshot from `source`.
pub fn load(source: impl AsRef<Path>) -> Result<SavedGameData> {
    let source = source.as_ref();
    let file = fs::File::open(source)?;
    let snapshot = codec::read_snapshot(std::io::BufReader::new(file))?;

    tracing::debug!(path = %source.display(), "loaded game snapshot");
    Ok(snapshot)
}

/// File-based implementation of [`SaveRepository`].
///
/// Stores each slot as `{slot}.sav` in the base directory.
pub struct FileSaveRepository {
    base_dir: PathBuf,
}

impl FileSaveRepository {
    /// Create a repository rooted at `base_dir`, creating the directory.
    pub fn new(base_dir: impl AsRef<Path>) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        fs::create_dir_all(&base_dir)?;
        Ok(Self { base_dir })
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Get the path to a slot file.
    pub fn slot_path(&self, slot: &str) -> Result<PathBuf> {
        validate_slot(slot)?;
        Ok(self.base_dir.join(format!("{slot}.{EXTENSION}")))
    }
}

impl SaveRepository for FileSaveRepository {
    fn save(&self, slot: &str, snapshot: &SavedGameData) -> Result<()> {
        save(snapshot, self.slot_path(slot)?)
    }

    fn load(&self, slot: &str) -> Result<SavedGameData> {
        let path = self.slot_path(slot)?;
        if !path.exists() {
            return Err(RepositoryError::SlotNotFound(slot.to_string()));
        }
        load(path)
    }

    fn exists(&self, slot: &str) -> bool {
        self.slot_path(slot).is_ok_and(|path| path.exists())
    }

    fn delete(&self, slot: &str) -> Result<()> {
        let path = self.slot_path(slot)?;

        if path.exists() {
            fs::remove_file(&path)?;
            tracing::debug!(slot, "deleted save slot");
        }

        Ok(())
    }

    fn list_slots(&self) -> Result<Vec<String>> {
        let mut slots = Vec::new();

        for entry in fs::read_dir(&self.base_dir)? {
            let path = entry?.path();

            if path.extension().is_some_and(|ext| ext == EXTENSION)
                && let Some(stem) = path.file_stem().and_then(|s| s.to_str())
                && validate_slot(stem).is_ok()
            {
                slots.push(stem.to_string());
            }
        }

        slots.sort_unstable();
        Ok(slots)
    }
}
