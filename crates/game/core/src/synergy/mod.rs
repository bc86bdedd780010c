//! Field-composition synergies.
//!
//! Synergies are a pure function of the deployed field and are never stored.
//! The resolver calls [`field_bonus_pct`] immediately before every damage
//! computation, so a creature that dies mid-turn stops contributing to the
//! very next hit.

pub mod rules;

use crate::state::{BattleState, Creature, CreatureId, SideId};

/// Synergy rule that produced a bonus.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "SCREAMING_SNAKE_CASE"))]
pub enum SynergyKind {
    SameSpecies,
    LegendaryPresence,
    BalancedStats,
    FullField,
    HighForm,
    AllDefensive,
}

/// One triggered synergy. `bonus_pct` is a whole percent (15 = +15%).
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct SynergyResult {
    pub kind: SynergyKind,
    pub label: String,
    pub bonus_pct: u32,
    pub contributors: Vec<CreatureId>,
}

/// Evaluates every synergy rule against a deployed field.
///
/// `capacity` is the field capacity of the side that owns `field`.
pub fn evaluate_synergies(field: &[Creature], capacity: usize) -> Vec<SynergyResult> {
    let mut results = rules::same_species(field);
    results.extend(rules::legendary_presence(field));
    results.extend(rules::balanced_stats(field));
    results.extend(rules::full_field(field, capacity));
    results.extend(rules::high_form(field));
    results.extend(rules::all_defensive(field));
    results
}

/// Sum of all bonuses; synergies stack additively.
pub fn total_bonus_pct(results: &[SynergyResult]) -> u32 {
    results.iter().map(|r| r.bonus_pct).sum()
}

/// Current synergy bonus of `side`, evaluated against its field right now.
pub fn field_bonus_pct(state: &BattleState, side: SideId) -> u32 {
    let side = state.side(side);
    total_bonus_pct(&evaluate_synergies(&side.field, side.field_capacity))
}
