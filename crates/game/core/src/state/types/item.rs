//! Items, rewards and missions.
//!
//! These are immutable value objects: construct them through the checked
//! constructors and copy them with `Clone`.

use rust_decimal::Decimal;

use crate::state::ProgressionError;

/// Something a player can buy and carry.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "ItemRepr")
)]
pub struct Item {
    name: String,
    description: String,
    #[cfg_attr(feature = "serde", serde(with = "rust_decimal::serde::str"))]
    cost: Decimal,
}

impl Item {
    /// Creates an item; the cost must not be negative.
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        cost: Decimal,
    ) -> Result<Self, ProgressionError> {
        if cost.is_sign_negative() && !cost.is_zero() {
            return Err(ProgressionError::NegativeAmount { amount: cost });
        }
        Ok(Self {
            name: name.into(),
            description: description.into(),
            cost: cost.abs(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// Price in currency units.
    pub fn cost(&self) -> Decimal {
        self.cost
    }
}

/// Experience and currency granted for finishing a battle or mission.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "RewardRepr")
)]
pub struct Reward {
    #[cfg_attr(feature = "serde", serde(with = "rust_decimal::serde::str"))]
    exp: Decimal,
    #[cfg_attr(feature = "serde", serde(with = "rust_decimal::serde::str"))]
    currency: Decimal,
}

impl Reward {
    /// Creates a reward; both amounts must be non-negative.
    pub fn new(exp: Decimal, currency: Decimal) -> Result<Self, ProgressionError> {
        for amount in [exp, currency] {
            if amount.is_sign_negative() && !amount.is_zero() {
                return Err(ProgressionError::NegativeAmount { amount });
            }
        }
        Ok(Self {
            exp: exp.abs(),
            currency: currency.abs(),
        })
    }

    /// Reward that grants nothing.
    pub const fn none() -> Self {
        Self {
            exp: Decimal::ZERO,
            currency: Decimal::ZERO,
        }
    }

    pub fn exp(&self) -> Decimal {
        self.exp
    }

    pub fn currency(&self) -> Decimal {
        self.currency
    }

    pub fn is_empty(&self) -> bool {
        self.exp.is_zero() && self.currency.is_zero()
    }
}

/// Read-only mission template.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Mission {
    pub name: String,
    pub description: String,
    pub clear_reward: Reward,
}

impl Mission {
    pub fn new(name: impl Into<String>, description: impl Into<String>, clear_reward: Reward) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            clear_reward,
        }
    }
}

#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct ItemRepr {
    name: String,
    description: String,
    #[serde(with = "rust_decimal::serde::str")]
    cost: Decimal,
}

#[cfg(feature = "serde")]
impl TryFrom<ItemRepr> for Item {
    type Error = ProgressionError;

    fn try_from(repr: ItemRepr) -> Result<Self, Self::Error> {
        Item::new(repr.name, repr.description, repr.cost)
    }
}

#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct RewardRepr {
    #[serde(with = "rust_decimal::serde::str")]
    exp: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    currency: Decimal,
}

#[cfg(feature = "serde")]
impl TryFrom<RewardRepr> for Reward {
    type Error = ProgressionError;

    fn try_from(repr: RewardRepr) -> Result<Self, Self::Error> {
        Reward::new(repr.exp, repr.currency)
    }
}
