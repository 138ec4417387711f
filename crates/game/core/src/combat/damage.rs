//! Damage calculation and application.

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

use super::element::{ElementType, Multiplier};

/// Damage produced by a single hit.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Damage {
    pub amount: u32,
    pub multiplier: Multiplier,
}

/// Calculate damage from an attack.
///
/// # Formula
///
/// ```text
/// final_damage = floor(power × multiplier(attacking, defending))
/// ```
///
/// The multiplier is exact (2, 0.5 or 1), so halving an odd power rounds down.
pub fn calculate_damage(power: u32, attacking: ElementType, defending: ElementType) -> Damage {
    let multiplier = attacking.multiplier_against(defending);
    let scaled = (Decimal::from(power) * multiplier.as_decimal()).floor();

    Damage {
        amount: scaled.to_u32().unwrap_or(u32::MAX),
        multiplier,
    }
}

/// Apply damage to current health.
///
/// Returns the new health value (clamped to 0).
pub fn apply_damage(current_health: u32, damage: u32) -> u32 {
    current_health.saturating_sub(damage)
}

/// Apply healing to current health.
///
/// Returns the new health value (clamped to `max_health`).
pub fn apply_heal(current_health: u32, amount: u32, max_health: u32) -> u32 {
    current_health.saturating_add(amount).min(max_health)
}
