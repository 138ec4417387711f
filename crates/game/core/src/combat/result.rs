//! Turn reports produced by the battle resolver.

use crate::action::Action;

use super::battle::{BattleState, Side};
use super::damage::Damage;

/// What an action did once applied.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ActionEffect {
    /// The opponent lost health.
    Damage(Damage),
    /// The actor regained `amount` health (after the max-health cap).
    Heal { amount: u32 },
    /// `USE SKILL` without a configured skill.
    Fizzled,
}

/// A single resolved action.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActionOutcome {
    pub side: Side,
    pub action: Action,
    pub effect: ActionEffect,
    /// Name of the skill used, if any.
    pub skill: Option<String>,
    /// Health the actor lost to its own skill.
    pub recoil: u32,
}

impl ActionOutcome {
    pub(crate) fn new(side: Side, action: Action, effect: ActionEffect) -> Self {
        Self {
            side,
            action,
            effect,
            skill: None,
            recoil: 0,
        }
    }

    /// Damage dealt to the opponent, or 0.
    pub fn damage_dealt(&self) -> u32 {
        match self.effect {
            ActionEffect::Damage(damage) => damage.amount,
            _ => 0,
        }
    }
}

/// Everything that happened during one call to
/// [`Battle::resolve_turn`](super::Battle::resolve_turn).
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TurnReport {
    pub turn: u32,
    /// Actions in resolution order. Holds fewer than two entries when the
    /// battle ended mid-turn.
    pub actions: Vec<ActionOutcome>,
    /// Battle state after the turn.
    pub state: BattleState,
    /// Side whose provider cancelled, when the turn aborted the battle.
    pub cancelled_by: Option<Side>,
    /// Set when the turn limit forced a draw.
    pub turn_limit_reached: bool,
}

impl TurnReport {
    pub(crate) fn new(turn: u32) -> Self {
        Self {
            turn,
            actions: Vec::with_capacity(2),
            state: BattleState::InProgress,
            cancelled_by: None,
            turn_limit_reached: false,
        }
    }
}
