use rust_decimal::Decimal;

use crate::combat::ElementType;
use crate::error::{ErrorSeverity, GameError};
use crate::state::{CombatStats, Reward};

/// Game configuration constants and tunable parameters.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GameConfig {
    pub battle: BattleRules,
    pub progression: ProgressionRules,
    pub encounters: EncounterRules,
    /// Combat stats given to freshly created players.
    pub starting_stats: CombatStats,
}

impl GameConfig {
    // ===== compile-time constants =====
    /// Level every new player starts at.
    pub const STARTING_LEVEL: u32 = 1;
    /// Upper bound accepted for a wild encounter chance, in percent.
    pub const MAX_ENCOUNTER_PERCENT: u8 = 100;

    pub fn new() -> Self {
        Self::default()
    }

    /// Rejects rule sets under which a new player or a reward payout would
    /// break the progression invariants.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.progression.validate()?;

        if self.encounters.wild_encounter_percent > Self::MAX_ENCOUNTER_PERCENT {
            return Err(ConfigError::InvalidValue {
                field: "encounters.wild_encounter_percent",
                reason: "must be at most 100",
            });
        }
        if self.starting_stats.max_health == 0 {
            return Err(ConfigError::InvalidValue {
                field: "starting_stats.max_health",
                reason: "must be positive",
            });
        }
        if self.encounters.wild_stats.max_health == 0 {
            return Err(ConfigError::InvalidValue {
                field: "encounters.wild_stats.max_health",
                reason: "must be positive",
            });
        }
        Ok(())
    }
}

/// A configuration value outside the range the rules can work with.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid config value '{field}': {reason}")]
    InvalidValue {
        field: &'static str,
        reason: &'static str,
    },
}

impl GameError for ConfigError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            ConfigError::InvalidValue { .. } => "CONFIG_INVALID_VALUE",
        }
    }
}

/// Rules applied while a battle is being resolved.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct BattleRules {
    /// Number of turns after which an undecided battle ends in a draw.
    /// Values below 1 are treated as 1.
    pub max_turns: u32,
    /// Granted to the human player for beating another player.
    pub versus_reward: Reward,
}

impl BattleRules {
    pub const DEFAULT_MAX_TURNS: u32 = 100;

    pub fn new(max_turns: u32) -> Self {
        Self {
            max_turns,
            versus_reward: default_reward(500_000, 10_000),
        }
    }

    /// Turn limit actually enforced by the resolver.
    pub const fn turn_limit(&self) -> u32 {
        if self.max_turns == 0 { 1 } else { self.max_turns }
    }
}

impl Default for BattleRules {
    fn default() -> Self {
        Self::new(Self::DEFAULT_MAX_TURNS)
    }
}

/// Experience and currency rules for player progression.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ProgressionRules {
    /// Experience needed to go from level 1 to level 2.
    #[cfg_attr(feature = "serde", serde(with = "rust_decimal::serde::str"))]
    pub starting_required_exp: Decimal,
    /// Factor applied to the requirement after every level-up.
    #[cfg_attr(feature = "serde", serde(with = "rust_decimal::serde::str"))]
    pub exp_growth: Decimal,
    /// Currency a new player owns.
    #[cfg_attr(feature = "serde", serde(with = "rust_decimal::serde::str"))]
    pub starting_currency: Decimal,
}

impl ProgressionRules {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.starting_required_exp <= Decimal::ZERO {
            return Err(ConfigError::InvalidValue {
                field: "progression.starting_required_exp",
                reason: "must be positive",
            });
        }
        if self.exp_growth <= Decimal::ONE {
            return Err(ConfigError::InvalidValue {
                field: "progression.exp_growth",
                reason: "must be greater than 1",
            });
        }
        if self.starting_currency.is_sign_negative() && !self.starting_currency.is_zero() {
            return Err(ConfigError::InvalidValue {
                field: "progression.starting_currency",
                reason: "must not be negative",
            });
        }
        Ok(())
    }
}

impl Default for ProgressionRules {
    fn default() -> Self {
        Self {
            // 1e6 experience to reach level 2, 5e6 currency to start with.
            starting_required_exp: Decimal::from(1_000_000u32),
            exp_growth: Decimal::new(15, 1),
            starting_currency: Decimal::from(5_000_000u32),
        }
    }
}

/// Wild encounter tuning consulted when the player steps on a tile.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EncounterRules {
    /// Chance, in percent, that entering an encounter tile starts a wild battle.
    pub wild_encounter_percent: u8,
    /// Stats of the wild creatures spawned by encounters.
    pub wild_stats: CombatStats,
    /// Granted for defeating a wild creature.
    pub wild_reward: Reward,
}

impl EncounterRules {
    pub const DEFAULT_WILD_ENCOUNTER_PERCENT: u8 = 20;

    /// Encounter chance as a probability in `[0, 1]`.
    pub fn probability(&self) -> f64 {
        f64::from(self.wild_encounter_percent.min(GameConfig::MAX_ENCOUNTER_PERCENT)) / 100.0
    }
}

impl Default for EncounterRules {
    fn default() -> Self {
        Self {
            wild_encounter_percent: Self::DEFAULT_WILD_ENCOUNTER_PERCENT,
            wild_stats: CombatStats::new(ElementType::Nature, 60, 12, 6),
            wild_reward: default_reward(100_000, 1_000),
        }
    }
}

fn default_reward(exp: u32, currency: u32) -> Reward {
    Reward::new(Decimal::from(exp), Decimal::from(currency)).unwrap_or(Reward::none())
}
