//! Battle resolution.
//!
//! Everything here is deterministic and free of I/O: the resolver takes the
//! combatants, asks injected [`ActionProvider`]s for intent, and returns
//! [`TurnReport`]s describing what happened. Logging and narration belong to
//! the caller.

pub mod battle;
pub mod damage;
pub mod element;
pub mod error;
pub mod provider;
pub mod result;

pub use battle::{Battle, BattleMode, BattleState, Combatant, Side};
pub use damage::{Damage, apply_damage, apply_heal, calculate_damage};
pub use element::{ElementType, Matchup, Multiplier, matchup, multiplier};
pub use error::BattleError;
pub use provider::{ActionCancelled, ActionProvider, ActionRequest};
pub use result::{ActionEffect, ActionOutcome, TurnReport};
