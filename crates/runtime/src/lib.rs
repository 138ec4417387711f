//! Runtime orchestration for the adventure game.
//!
//! This crate wires the pure rules of `game-core` to the outside world:
//! persistence, action providers, narration and process configuration.
//! Consumers create a [`GameSession`] and drive it turn by turn.
//!
//! Modules are organized by responsibility:
//! - [`session`] hosts the single mutator of a running campaign
//! - [`repository`] saves and loads snapshots in the framed binary format
//! - [`providers`] ships scripted and AI action providers
//! - [`narrative`] abstracts the external text generator
//! - [`config`] reads process configuration from the environment
pub mod config;
pub mod error;
pub mod narrative;
pub mod providers;
pub mod repository;
pub mod session;

pub use config::RuntimeConfig;
pub use error::{Result, SessionError};
pub use narrative::{CannedNarrator, NarrativeError, NarrativeProvider, SilentNarrator};
pub use providers::{AiPolicyProvider, ScriptedActionProvider};
pub use repository::{
    FileSaveRepository, InMemorySaveRepository, RepositoryError, SaveRepository,
};
pub use session::{BattleSummary, GameSession, MoveOutcome, random_name};
