//! Damage arithmetic shared by attacks and damaging spells.

use crate::config::GameConfig;
use crate::stats::BattleStats;

/// Which offense/defense pair an attack uses.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumString)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum AttackStyle {
    Physical,
    Magical,
}

impl AttackStyle {
    /// The attacker's stronger offense; physical wins ties.
    pub fn preferred(stats: &BattleStats) -> Self {
        if stats.magical_attack > stats.physical_attack {
            AttackStyle::Magical
        } else {
            AttackStyle::Physical
        }
    }

    pub fn offense(self, stats: &BattleStats) -> u32 {
        match self {
            AttackStyle::Physical => stats.physical_attack,
            AttackStyle::Magical => stats.magical_attack,
        }
    }

    pub fn defense(self, stats: &BattleStats) -> u32 {
        match self {
            AttackStyle::Physical => stats.physical_defense,
            AttackStyle::Magical => stats.magical_defense,
        }
    }
}

/// Damage of one hit.
///
/// `max(offense - defense, 1)`, scaled by the attacker's synergy percent,
/// reduced by the defend stance, then floored at the configured minimum.
pub fn calculate_damage(
    offense: u32,
    defense: u32,
    synergy_pct: u32,
    target_defending: bool,
    config: &GameConfig,
) -> u32 {
    let base = u64::from(offense.saturating_sub(defense).max(1));
    let mut damage = base * (100 + u64::from(synergy_pct)) / 100;
    if target_defending {
        let kept = 100u64.saturating_sub(u64::from(config.defend_reduction_pct));
        damage = damage * kept / 100;
    }
    let floor = u64::from(config.minimum_damage);
    u32::try_from(damage.max(floor)).unwrap_or(u32::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_hit_subtracts_defense() {
        let config = GameConfig::default();
        assert_eq!(calculate_damage(20, 8, 0, false, &config), 12);
    }

    #[test]
    fn defending_target_takes_half() {
        let config = GameConfig::default();
        assert_eq!(calculate_damage(20, 8, 0, true, &config), 6);
    }

    #[test]
    fn overwhelming_defense_still_deals_minimum() {
        let config = GameConfig::default();
        assert_eq!(calculate_damage(3, 50, 0, false, &config), 1);
        assert_eq!(calculate_damage(3, 50, 0, true, &config), 1);
    }

    #[test]
    fn synergy_scales_before_defend() {
        let config = GameConfig::default();
        // 12 * 1.25 = 15, halved = 7
        assert_eq!(calculate_damage(20, 8, 25, false, &config), 15);
        assert_eq!(calculate_damage(20, 8, 25, true, &config), 7);
    }

    #[test]
    fn preferred_style_follows_stronger_offense() {
        let mut stats = BattleStats {
            max_health: 10,
            physical_attack: 4,
            magical_attack: 9,
            physical_defense: 1,
            magical_defense: 1,
            initiative: 1,
            energy_cost: 5,
        };
        assert_eq!(AttackStyle::preferred(&stats), AttackStyle::Magical);

        stats.physical_attack = 9;
        assert_eq!(AttackStyle::preferred(&stats), AttackStyle::Physical);
    }
}
