//! Player progression state.
//!
//! Experience and currency are exact decimals. All mutating operations
//! compute the new values first and commit only on success, so a failed
//! operation leaves the player untouched.

use rust_decimal::Decimal;

use crate::action::SkillEffect;
use crate::config::{GameConfig, ProgressionRules};
use crate::state::ProgressionError;

use super::{AdventureModeLocation, CombatStats, Item, Mission, Reward};

/// Progression payload shared by human and AI players.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Player {
    pub(crate) level: u32,
    #[cfg_attr(feature = "serde", serde(with = "rust_decimal::serde::str"))]
    pub(crate) exp: Decimal,
    #[cfg_attr(feature = "serde", serde(with = "rust_decimal::serde::str"))]
    pub(crate) required_exp: Decimal,
    #[cfg_attr(feature = "serde", serde(with = "rust_decimal::serde::str"))]
    pub(crate) currency: Decimal,
    pub stats: CombatStats,
    pub skill: Option<SkillEffect>,
    /// City the player stands in, by name. `None` until a city is entered.
    pub city: Option<String>,
    pub location: AdventureModeLocation,
    pub(crate) inventory: Vec<Item>,
    pub(crate) completed_missions: Vec<String>,
}

/// Levels gained by a single progression update.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LevelUp {
    pub from: u32,
    pub to: u32,
}

impl LevelUp {
    pub const fn levels_gained(&self) -> u32 {
        self.to - self.from
    }

    pub const fn leveled_up(&self) -> bool {
        self.to > self.from
    }
}

impl Player {
    /// Creates a level 1 player using the starting values from `rules`.
    pub fn new(rules: &ProgressionRules, stats: CombatStats) -> Self {
        Self {
            level: GameConfig::STARTING_LEVEL,
            exp: Decimal::ZERO,
            required_exp: rules.starting_required_exp,
            currency: rules.starting_currency,
            stats,
            skill: None,
            city: None,
            location: AdventureModeLocation::ORIGIN,
            inventory: Vec::new(),
            completed_missions: Vec::new(),
        }
    }

    /// Equips a battle skill (builder pattern).
    #[must_use]
    pub fn with_skill(mut self, skill: SkillEffect) -> Self {
        self.skill = Some(skill);
        self
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn exp(&self) -> Decimal {
        self.exp
    }

    pub fn required_exp(&self) -> Decimal {
        self.required_exp
    }

    pub fn currency(&self) -> Decimal {
        self.currency
    }

    pub fn inventory(&self) -> &[Item] {
        &self.inventory
    }

    pub fn completed_missions(&self) -> &[String] {
        &self.completed_missions
    }

    pub fn has_completed(&self, mission_name: &str) -> bool {
        self.completed_missions.iter().any(|name| name == mission_name)
    }

    /// Grants a reward and performs any level-ups it triggers.
    ///
    /// Leftover experience carries into the next level; the requirement grows
    /// by `rules.exp_growth` after each level-up.
    pub fn apply_reward(
        &mut self,
        reward: &Reward,
        rules: &ProgressionRules,
    ) -> Result<LevelUp, ProgressionError> {
        if rules.exp_growth <= Decimal::ONE {
            return Err(ProgressionError::InvalidRules {
                reason: "exp_growth must be greater than 1",
            });
        }
        if self.required_exp <= Decimal::ZERO {
            return Err(ProgressionError::InvalidRules {
                reason: "required experience must be positive",
            });
        }

        let currency = self
            .currency
            .checked_add(reward.currency())
            .ok_or(ProgressionError::Overflow)?;
        let mut exp = self
            .exp
            .checked_add(reward.exp())
            .ok_or(ProgressionError::Overflow)?;
        let mut required_exp = self.required_exp;
        let mut level = self.level;

        while exp >= required_exp {
            exp -= required_exp;
            level = level.checked_add(1).ok_or(ProgressionError::Overflow)?;
            required_exp = required_exp
                .checked_mul(rules.exp_growth)
                .ok_or(ProgressionError::Overflow)?;
        }

        let level_up = LevelUp {
            from: self.level,
            to: level,
        };
        self.currency = currency;
        self.exp = exp;
        self.required_exp = required_exp;
        self.level = level;
        Ok(level_up)
    }

    /// Completes a mission once, granting its clear reward.
    pub fn complete_mission(
        &mut self,
        mission: &Mission,
        rules: &ProgressionRules,
    ) -> Result<LevelUp, ProgressionError> {
        if self.has_completed(&mission.name) {
            return Err(ProgressionError::MissionAlreadyCompleted {
                name: mission.name.clone(),
            });
        }
        let level_up = self.apply_reward(&mission.clear_reward, rules)?;
        self.completed_missions.push(mission.name.clone());
        Ok(level_up)
    }

    /// Buys `item`, storing an independent copy in the inventory.
    pub fn purchase(&mut self, item: &Item) -> Result<(), ProgressionError> {
        if item.cost() > self.currency {
            return Err(ProgressionError::InsufficientFunds {
                cost: item.cost(),
                balance: self.currency,
            });
        }
        self.currency -= item.cost();
        self.inventory.push(item.clone());
        Ok(())
    }
}
