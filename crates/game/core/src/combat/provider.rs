//! Abstraction for sourcing combatant intent.
//!
//! The resolver never decides what a combatant does. Callers plug in
//! [`ActionProvider`] implementations so a battle can run with human input,
//! AI policies, or scripted fixtures. Providers are synchronous: the call
//! returns before resolution proceeds.

use crate::action::Action;

use super::battle::{Combatant, Side};

/// Everything a provider may look at when choosing an action.
#[derive(Clone, Copy, Debug)]
pub struct ActionRequest<'a> {
    /// Side that has to act.
    pub side: Side,
    /// 1-based turn number.
    pub turn: u32,
    pub actor: &'a Combatant,
    pub opponent: &'a Combatant,
}

/// Returned by a provider when action selection was cancelled (e.g. the
/// player closed the prompt). The battle is aborted.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[error("action selection was cancelled")]
pub struct ActionCancelled;

/// Trait for providing a battle action for one side.
pub trait ActionProvider {
    fn provide_action(&mut self, request: &ActionRequest<'_>) -> Result<Action, ActionCancelled>;
}

impl<F> ActionProvider for F
where
    F: FnMut(&ActionRequest<'_>) -> Result<Action, ActionCancelled>,
{
    fn provide_action(&mut self, request: &ActionRequest<'_>) -> Result<Action, ActionCancelled> {
        self(request)
    }
}
