//! Growth bonuses shared by every derived stat.
//!
//! Combination levels add up as `Increased` percentages and are applied
//! once; form and rarity multipliers are `More` bonuses applied one after
//! another. The result is clamped last.

/// A single growth bonus.
///
/// - **Increased**: percentages summed, then applied once (20 = +20%)
/// - **More**: multipliers applied one after another (50 = ×1.5, -40 = ×0.6)
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Bonus {
    Increased(i32),
    More(i32),
}

impl Bonus {
    pub fn increased(percent: i32) -> Self {
        Bonus::Increased(percent)
    }

    pub fn more(percent: i32) -> Self {
        Bonus::More(percent)
    }
}

/// Clamp range for a family of stats.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StatBounds {
    pub min: i32,
    pub max: i32,
}

impl StatBounds {
    /// Offense, defense and initiative.
    pub const COMBAT: Self = Self { min: 0, max: 9999 };

    /// Maximum health never drops to zero; a zero-health creature is defeated.
    pub const HEALTH: Self = Self { min: 1, max: 99999 };
}

/// Ordered growth bonuses for one creature.
///
/// Integer math throughout; each multiplication truncates toward zero.
///
/// # Example
/// ```
/// # use arena_core::stats::bonus::{Bonus, BonusStack, StatBounds};
/// let mut stack = BonusStack::new();
/// stack.add(Bonus::increased(20)); // combination level 2
/// stack.add(Bonus::more(25));      // form 2
/// stack.add(Bonus::more(15));      // rare
///
/// // 100 × 1.2 = 120, × 1.25 = 150, × 1.15 = 172
/// assert_eq!(stack.apply(100, StatBounds::COMBAT), 172);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BonusStack {
    bonuses: Vec<Bonus>,
}

impl BonusStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, bonus: Bonus) {
        self.bonuses.push(bonus);
    }

    pub fn with(mut self, bonus: Bonus) -> Self {
        self.add(bonus);
        self
    }

    /// ```text
    /// result = clamp(base × (1 + Σ inc/100) × Π (1 + more/100), min, max)
    /// ```
    ///
    /// Intermediate values are widened and saturate, so any input lands
    /// inside `bounds`.
    pub fn apply(&self, base: i32, bounds: StatBounds) -> i32 {
        let increased: i64 = self
            .bonuses
            .iter()
            .map(|bonus| match bonus {
                Bonus::Increased(percent) => i64::from(*percent),
                Bonus::More(_) => 0,
            })
            .sum();

        let scaled = |value: i64, percent: i64| value.saturating_mul(100 + percent) / 100;
        let value = self
            .bonuses
            .iter()
            .fold(scaled(i64::from(base), increased), |value, bonus| match bonus {
                Bonus::More(percent) => scaled(value, i64::from(*percent)),
                Bonus::Increased(_) => value,
            });

        let clamped = value.clamp(i64::from(bounds.min), i64::from(bounds.max));
        i32::try_from(clamped).unwrap_or(bounds.max)
    }

    pub fn is_empty(&self) -> bool {
        self.bonuses.is_empty()
    }

    pub fn len(&self) -> usize {
        self.bonuses.len()
    }
}
