//! Skill effects supplied as data.
//!
//! The engine ships no skill catalog. A combatant may carry one
//! [`SkillEffect`]; `USE SKILL` applies it, and fizzles when none is set.

use crate::combat::ElementType;

/// What a skill does to its target (or its user, for heals).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SkillKind {
    /// Deals `power` damage, scaled by the matchup chart.
    ///
    /// `element` overrides the user's own element when set.
    Damage {
        power: u32,
        element: Option<ElementType>,
    },
    /// Restores `amount` health to the user.
    Heal { amount: u32 },
}

/// Data-driven skill definition.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SkillEffect {
    pub name: String,
    pub kind: SkillKind,
    /// Health the user loses after the skill resolves.
    pub recoil: u32,
}

impl SkillEffect {
    pub fn damage(name: impl Into<String>, power: u32, element: Option<ElementType>) -> Self {
        Self {
            name: name.into(),
            kind: SkillKind::Damage { power, element },
            recoil: 0,
        }
    }

    pub fn heal(name: impl Into<String>, amount: u32) -> Self {
        Self {
            name: name.into(),
            kind: SkillKind::Heal { amount },
            recoil: 0,
        }
    }

    /// Adds recoil damage taken by the user (builder pattern).
    #[must_use]
    pub fn with_recoil(mut self, recoil: u32) -> Self {
        self.recoil = recoil;
        self
    }
}
