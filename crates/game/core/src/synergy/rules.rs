//! Individual synergy rules. Each rule looks at the field on its own and
//! returns at most a handful of results; [`super::evaluate_synergies`] only
//! concatenates them.

use std::collections::BTreeMap;

use crate::state::{Creature, CreatureId};
use crate::stats::Rarity;

use super::{SynergyKind, SynergyResult};

/// Percent per creature of a repeated species.
pub const SPECIES_PCT_PER_CREATURE: u32 = 5;
pub const LEGENDARY_PCT: u32 = 10;
pub const BALANCED_PCT: u32 = 8;
/// No stat category may exceed this share of the field total, in percent.
pub const BALANCED_MAX_SHARE_PCT: u32 = 35;
pub const FULL_FIELD_PCT: u32 = 5;
pub const HIGH_FORM_PCT: u32 = 10;
pub const HIGH_FORM_THRESHOLD: u8 = 3;
pub const DEFENSIVE_PCT: u32 = 7;

/// Archetype and balance rules need at least this many creatures.
const MIN_GROUP: usize = 2;

fn ids<'a>(creatures: impl IntoIterator<Item = &'a Creature>) -> Vec<CreatureId> {
    creatures.into_iter().map(|c| c.id).collect()
}

/// One result per species present at least twice, scaled by its count.
pub fn same_species(field: &[Creature]) -> Vec<SynergyResult> {
    let mut by_species: BTreeMap<&str, Vec<CreatureId>> = BTreeMap::new();
    for creature in field {
        by_species
            .entry(creature.species.as_str())
            .or_default()
            .push(creature.id);
    }

    by_species
        .into_iter()
        .filter(|(_, members)| members.len() >= MIN_GROUP)
        .map(|(species, members)| SynergyResult {
            kind: SynergyKind::SameSpecies,
            label: format!("{species} pack ×{}", members.len()),
            bonus_pct: SPECIES_PCT_PER_CREATURE * members.len() as u32,
            contributors: members,
        })
        .collect()
}

pub fn legendary_presence(field: &[Creature]) -> Option<SynergyResult> {
    let legends: Vec<_> = field
        .iter()
        .filter(|c| c.rarity == Rarity::Legendary)
        .collect();
    if legends.is_empty() {
        return None;
    }
    Some(SynergyResult {
        kind: SynergyKind::LegendaryPresence,
        label: "Legendary presence".into(),
        bonus_pct: LEGENDARY_PCT,
        contributors: ids(legends),
    })
}

/// Field-wide totals of the four combat categories stay within
/// [`BALANCED_MAX_SHARE_PCT`] of their sum.
pub fn balanced_stats(field: &[Creature]) -> Option<SynergyResult> {
    if field.len() < MIN_GROUP {
        return None;
    }

    let totals = field.iter().fold([0u64; 4], |mut acc, c| {
        acc[0] += u64::from(c.stats.physical_attack);
        acc[1] += u64::from(c.stats.magical_attack);
        acc[2] += u64::from(c.stats.physical_defense);
        acc[3] += u64::from(c.stats.magical_defense);
        acc
    });
    let sum: u64 = totals.iter().sum();
    let largest = totals.iter().copied().max().unwrap_or(0);

    if sum == 0 || largest * 100 > sum * u64::from(BALANCED_MAX_SHARE_PCT) {
        return None;
    }
    Some(SynergyResult {
        kind: SynergyKind::BalancedStats,
        label: "Balanced formation".into(),
        bonus_pct: BALANCED_PCT,
        contributors: ids(field),
    })
}

pub fn full_field(field: &[Creature], capacity: usize) -> Option<SynergyResult> {
    if capacity == 0 || field.len() < capacity {
        return None;
    }
    Some(SynergyResult {
        kind: SynergyKind::FullField,
        label: "Full field".into(),
        bonus_pct: FULL_FIELD_PCT,
        contributors: ids(field),
    })
}

pub fn high_form(field: &[Creature]) -> Option<SynergyResult> {
    if field.len() < MIN_GROUP || field.iter().any(|c| c.form.0 < HIGH_FORM_THRESHOLD) {
        return None;
    }
    Some(SynergyResult {
        kind: SynergyKind::HighForm,
        label: "Elder forms".into(),
        bonus_pct: HIGH_FORM_PCT,
        contributors: ids(field),
    })
}

pub fn all_defensive(field: &[Creature]) -> Option<SynergyResult> {
    if field.len() < MIN_GROUP || field.iter().any(|c| c.stats.defense() < c.stats.offense()) {
        return None;
    }
    Some(SynergyResult {
        kind: SynergyKind::AllDefensive,
        label: "Shield wall".into(),
        bonus_pct: DEFENSIVE_PCT,
        contributors: ids(field),
    })
}
