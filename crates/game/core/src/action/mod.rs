//! Battle actions.
//!
//! An [`Action`] is what a combatant chooses to do on its turn. The set is
//! closed: a normal attack, a normal heal, or a skill whose effect is supplied
//! as data by the caller (see [`SkillEffect`]).
//!
//! # Module Structure
//!
//! - `error`: Action name parsing errors
//! - `skill`: Caller-supplied skill effects

pub mod error;
pub mod skill;

pub use error::ActionParseError;
pub use skill::{SkillEffect, SkillKind};

/// An action a combatant can take during a battle turn.
///
/// Canonical names are `"NORMAL ATTACK"`, `"NORMAL HEAL"` and `"USE SKILL"`.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(ascii_case_insensitive)]
pub enum Action {
    /// Element-scaled attack on the opposing combatant.
    #[default]
    #[strum(to_string = "NORMAL ATTACK", serialize = "NORMAL_ATTACK")]
    NormalAttack,

    /// Restore the actor's own health.
    #[strum(to_string = "NORMAL HEAL", serialize = "NORMAL_HEAL")]
    NormalHeal,

    /// Use the actor's configured skill, if it has one.
    #[strum(to_string = "USE SKILL", serialize = "USE_SKILL")]
    UseSkill,
}

impl Action {
    /// Action used when a name is not recognized.
    pub const FALLBACK: Action = Action::NormalAttack;

    /// Parses an action name strictly.
    ///
    /// Leading and trailing whitespace is ignored and matching is
    /// case-insensitive.
    pub fn parse(name: &str) -> Result<Self, ActionParseError> {
        name.trim()
            .parse()
            .map_err(|_| ActionParseError::InvalidActionName {
                name: name.to_owned(),
            })
    }

    /// Builds an action from a name, falling back to [`Action::FALLBACK`]
    /// (`NORMAL ATTACK`) when the name is not recognized.
    ///
    /// Free-form player input always yields an action. Callers that need to
    /// know whether the fallback was taken should use [`Action::parse`].
    pub fn from_name(name: &str) -> Self {
        Self::parse(name).unwrap_or(Self::FALLBACK)
    }

    /// Canonical display name.
    pub const fn name(self) -> &'static str {
        match self {
            Action::NormalAttack => "NORMAL ATTACK",
            Action::NormalHeal => "NORMAL HEAL",
            Action::UseSkill => "USE SKILL",
        }
    }
}
