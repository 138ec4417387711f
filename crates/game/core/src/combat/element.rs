//! Elemental types and the damage matchup chart.
//!
//! The chart is a hand-curated advantage graph: it is neither symmetric nor
//! transitive. Each attacking element lists the defenders it deals double
//! damage to and the defenders it deals half damage to; every other pairing
//! deals normal damage.

use rust_decimal::Decimal;

/// Closed set of elements a combatant (or a skill) can carry.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
    strum::EnumIter,
    strum::EnumCount,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "SCREAMING_SNAKE_CASE"))]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE", ascii_case_insensitive)]
pub enum ElementType {
    #[default]
    Terra,
    Flame,
    Sea,
    Nature,
    Electric,
    Ice,
    Metal,
    Dark,
    Light,
    War,
    Pure,
    Legend,
    Primal,
    Wind,
}

impl ElementType {
    /// Damage multiplier when `self` attacks `defending`.
    pub fn multiplier_against(self, defending: ElementType) -> Multiplier {
        matchup(self).against(defending)
    }
}

/// One of the three damage multipliers the chart can produce.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Multiplier {
    /// Double damage (×2).
    Double,
    /// Half damage (×0.5).
    Half,
    /// Normal damage (×1).
    Normal,
}

impl Multiplier {
    /// Exact decimal value of the multiplier.
    pub fn as_decimal(self) -> Decimal {
        match self {
            Multiplier::Double => Decimal::TWO,
            Multiplier::Half => Decimal::new(5, 1),
            Multiplier::Normal => Decimal::ONE,
        }
    }
}

/// Row of the matchup chart for a single attacking element.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Matchup {
    /// Defenders that take double damage.
    pub double_damage: &'static [ElementType],
    /// Defenders that take half damage.
    pub half_damage: &'static [ElementType],
}

impl Matchup {
    const fn new(
        double_damage: &'static [ElementType],
        half_damage: &'static [ElementType],
    ) -> Self {
        Self {
            double_damage,
            half_damage,
        }
    }

    pub fn against(&self, defending: ElementType) -> Multiplier {
        if self.double_damage.contains(&defending) {
            Multiplier::Double
        } else if self.half_damage.contains(&defending) {
            Multiplier::Half
        } else {
            Multiplier::Normal
        }
    }
}

/// Returns the chart row for `attacking`.
///
/// The match is exhaustive over [`ElementType`], so adding an element without
/// a chart row is a compile error.
pub const fn matchup(attacking: ElementType) -> Matchup {
    use ElementType::*;

    match attacking {
        Terra => Matchup::new(&[Electric, Dark], &[Metal, War]),
        Flame => Matchup::new(&[Nature, Ice], &[Sea, War]),
        Sea => Matchup::new(&[Flame, War], &[Nature, Electric]),
        Nature => Matchup::new(&[Sea, Light], &[Flame, Ice]),
        Electric => Matchup::new(&[Sea, Metal], &[Terra, Light]),
        Ice => Matchup::new(&[Nature, War], &[Flame, Metal]),
        Metal => Matchup::new(&[Terra, Ice], &[Electric, Dark]),
        Dark => Matchup::new(&[Metal, Light], &[Terra]),
        Light => Matchup::new(&[Electric, Dark], &[Nature]),
        War => Matchup::new(&[Terra, Flame], &[Sea, Ice]),
        Pure => Matchup::new(&[Legend], &[Primal]),
        Legend => Matchup::new(&[Primal], &[Pure]),
        Primal => Matchup::new(&[Pure], &[Legend]),
        Wind => Matchup::new(&[Wind], &[]),
    }
}

/// Damage multiplier for an attack of element `attacking` hitting `defending`.
///
/// Always one of 2, 0.5 or 1.
pub fn multiplier(attacking: ElementType, defending: ElementType) -> Decimal {
    attacking.multiplier_against(defending).as_decimal()
}
