//! Repository layer for saved games.
//!
//! Snapshots are written only at explicit save points. Static game content
//! (cities, items, missions) comes from `game-content`, not from here.

pub mod codec;
mod error;
pub mod file;
mod memory;
mod traits;

pub use codec::{FORMAT_VERSION, MAGIC, decode, encode, read_snapshot, write_snapshot};
pub use error::{RepositoryError, Result};
pub use file::FileSaveRepository;
pub use memory::InMemorySaveRepository;
pub use traits::{SaveRepository, validate_slot};
