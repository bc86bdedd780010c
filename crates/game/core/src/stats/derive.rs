//! Battle stat derivation.
//!
//! `BattleStats` are computed once when a creature is dealt and cached on the
//! instance. Derivation is pure: the same attributes, form, rarity and
//! combination level always yield the same stats.

use crate::config::GameConfig;
use crate::error::{ErrorSeverity, GameError};

use super::attributes::{BaseAttributes, CoreAttributes, Form, Rarity};
use super::bonus::{Bonus, BonusStack, StatBounds};

/// Errors raised while deriving stats from catalog data.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum StatsError {
    #[error("invalid creature data: missing required attribute `{missing}`")]
    InvalidCreatureData { missing: &'static str },
}

impl GameError for StatsError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidCreatureData { .. } => "STATS_INVALID_CREATURE_DATA",
        }
    }
}

/// Effective combat statistics of a creature.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct BattleStats {
    pub max_health: u32,
    pub physical_attack: u32,
    pub magical_attack: u32,
    pub physical_defense: u32,
    pub magical_defense: u32,
    pub initiative: u32,
    pub energy_cost: u32,
}

impl BattleStats {
    /// Sum of both offense stats.
    pub fn offense(&self) -> u32 {
        self.physical_attack + self.magical_attack
    }

    /// Sum of both defense stats.
    pub fn defense(&self) -> u32 {
        self.physical_defense + self.magical_defense
    }

    /// Base formulas before growth bonuses:
    /// - max health: STA × 10 + STR × 2
    /// - physical attack: STR + SPD / 4
    /// - magical attack: MAG + ENG / 4
    /// - physical defense: STA / 2 + STR / 4
    /// - magical defense: (MAG + STA + ENG) / 4
    /// - initiative: SPD
    fn compute_base(core: &CoreAttributes) -> [i32; 6] {
        [
            core.stamina * 10 + core.strength * 2,
            core.strength + core.speed / 4,
            core.magic + core.energy / 4,
            core.stamina / 2 + core.strength / 4,
            (core.magic + core.stamina + core.energy) / 4,
            core.speed,
        ]
    }
}

/// Growth bonuses for one creature: form, rarity and combination level.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Growth {
    pub form: Form,
    pub rarity: Rarity,
    pub combination: u32,
}

impl Growth {
    /// Combination levels above this do not add further growth.
    pub const MAX_COMBINATION: u32 = 20;

    pub fn new(form: Form, rarity: Rarity, combination: u32) -> Self {
        Self {
            form,
            rarity,
            combination,
        }
    }

    /// Bonus stack shared by every derived stat.
    pub fn bonus_stack(&self) -> BonusStack {
        let mut stack = BonusStack::new();
        let combination = self.combination.min(Self::MAX_COMBINATION) as i32;
        if combination > 0 {
            stack.add(Bonus::increased(10 * combination));
        }
        stack.add(Bonus::more(self.form.multiplier_pct()));
        stack.add(Bonus::more(self.rarity.multiplier_pct()));
        stack
    }
}

impl BattleStats {
    /// Applies `bonuses` to the base formulas. The energy cost is left at the
    /// default because it depends on the raw attribute bag.
    pub fn compute(base: &CoreAttributes, bonuses: &BonusStack) -> Self {
        let [health, patk, matk, pdef, mdef, init] = Self::compute_base(base);
        let combat = |value: i32| bonuses.apply(value, StatBounds::COMBAT) as u32;

        Self {
            max_health: bonuses.apply(health, StatBounds::HEALTH) as u32,
            physical_attack: combat(patk),
            magical_attack: combat(matk),
            physical_defense: combat(pdef),
            magical_defense: combat(mdef),
            initiative: combat(init),
            energy_cost: GameConfig::DEFAULT_ENERGY_COST,
        }
    }
}

/// Derives battle stats for a creature.
///
/// The energy cost is the catalogued cost plus the form surcharge, or exactly
/// [`GameConfig::DEFAULT_ENERGY_COST`] when the catalog has none.
///
/// # Errors
///
/// [`StatsError::InvalidCreatureData`] when strength, magic, stamina or speed
/// is absent.
pub fn derive_stats(bag: &BaseAttributes, growth: Growth) -> Result<BattleStats, StatsError> {
    let core = CoreAttributes::from_bag(bag)?;
    let mut stats = BattleStats::compute(&core, &growth.bonus_stack());
    stats.energy_cost = bag
        .energy_cost
        .map(|cost| {
            cost.min(CoreAttributes::MAX_ATTRIBUTE)
                .saturating_add(growth.form.energy_surcharge())
        })
        .unwrap_or(GameConfig::DEFAULT_ENERGY_COST);
    Ok(stats)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bag() -> BaseAttributes {
        BaseAttributes::new(10, 6, 8, 12)
    }

    #[test]
    fn derives_baseline_stats() {
        let stats = derive_stats(&bag(), Growth::new(Form(1), Rarity::Common, 0)).unwrap();

        assert_eq!(stats.max_health, 100);
        assert_eq!(stats.physical_attack, 13);
        assert_eq!(stats.magical_attack, 6);
        assert_eq!(stats.physical_defense, 6);
        assert_eq!(stats.magical_defense, 3);
        assert_eq!(stats.initiative, 12);
        assert_eq!(stats.energy_cost, GameConfig::DEFAULT_ENERGY_COST);
    }

    #[test]
    fn higher_form_raises_stats_and_cost() {
        let bag = bag().with_energy_cost(3);
        let low = derive_stats(&bag, Growth::new(Form(1), Rarity::Common, 0)).unwrap();
        let high = derive_stats(&bag, Growth::new(Form(3), Rarity::Common, 0)).unwrap();

        assert_eq!(low.energy_cost, 3);
        assert_eq!(high.energy_cost, 5);
        assert_eq!(high.max_health, 150);
        assert!(high.physical_attack > low.physical_attack);
    }

    #[test]
    fn eggs_are_weaker_than_hatched_forms() {
        let egg = derive_stats(&bag(), Growth::new(Form::EGG, Rarity::Common, 0)).unwrap();
        assert_eq!(egg.max_health, 60);
    }

    #[test]
    fn rarity_multiplier_is_ordered() {
        let health = |rarity| {
            derive_stats(&bag(), Growth::new(Form(1), rarity, 0))
                .unwrap()
                .max_health
        };

        assert_eq!(health(Rarity::Common), 100);
        assert_eq!(health(Rarity::Rare), 115);
        assert_eq!(health(Rarity::Epic), 135);
        assert_eq!(health(Rarity::Legendary), 160);
    }

    #[test]
    fn combination_level_adds_increased_bonus() {
        let stats = derive_stats(&bag(), Growth::new(Form(1), Rarity::Common, 2)).unwrap();
        assert_eq!(stats.max_health, 120);
    }

    #[test]
    fn missing_attribute_is_invalid_creature_data() {
        let mut bag = bag();
        bag.stamina = None;

        let err = derive_stats(&bag, Growth::default()).unwrap_err();
        assert_eq!(
            err,
            StatsError::InvalidCreatureData {
                missing: "stamina"
            }
        );
    }

    #[test]
    fn missing_energy_cost_defaults_to_five_for_every_form() {
        let stats = derive_stats(&bag(), Growth::new(Form(4), Rarity::Epic, 0)).unwrap();
        assert_eq!(stats.energy_cost, 5);
    }

    #[test]
    fn extreme_catalog_values_stay_within_bounds() {
        let bag = BaseAttributes::new(u32::MAX, u32::MAX, u32::MAX, u32::MAX)
            .with_energy(u32::MAX)
            .with_energy_cost(u32::MAX);
        let growth = Growth::new(Form(u8::MAX), Rarity::Legendary, Growth::MAX_COMBINATION);

        let stats = derive_stats(&bag, growth).unwrap();

        assert_eq!(stats.max_health, 99_999);
        assert_eq!(stats.physical_attack, 9_999);
        assert_eq!(stats.initiative, 9_999);
        assert_eq!(stats.energy_cost, CoreAttributes::MAX_ATTRIBUTE + 254);
    }
}
