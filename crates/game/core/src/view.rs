//! Per-viewer projection of a battle.
//!
//! The viewer sees its own hand and loadout. The opponent's hand is reduced to
//! a count and its loadout is withheld. Both fields, energy totals and the
//! battle log are public.

use crate::action::{ActionMask, legal_kinds};
use crate::state::{
    BattleSide, BattleState, Creature, CreatureId, LogEntry, Phase, SideId, Spell, StatusEffect,
    Timestamp, Tool,
};
use crate::stats::{BattleStats, Form, Rarity};
use crate::synergy::{SynergyResult, evaluate_synergies};

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct CreatureView {
    pub id: CreatureId,
    pub species: String,
    pub form: Form,
    pub rarity: Rarity,
    pub health: u32,
    pub stats: BattleStats,
    pub is_defending: bool,
    pub status: Vec<StatusEffect>,
}

impl From<&Creature> for CreatureView {
    fn from(creature: &Creature) -> Self {
        Self {
            id: creature.id,
            species: creature.species.clone(),
            form: creature.form,
            rarity: creature.rarity,
            health: creature.health(),
            stats: creature.stats,
            is_defending: creature.is_defending,
            status: creature.status.iter().copied().collect(),
        }
    }
}

/// A hand as seen by the viewer: full for its own side, a count otherwise.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum HandView {
    Visible(Vec<CreatureView>),
    Hidden {
        #[cfg_attr(feature = "serde", serde(rename = "hiddenCount"))]
        hidden_count: usize,
    },
}

impl HandView {
    pub fn len(&self) -> usize {
        match self {
            HandView::Visible(cards) => cards.len(),
            HandView::Hidden { hidden_count } => *hidden_count,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct SideView {
    pub id: SideId,
    pub energy: u32,
    pub hand: HandView,
    pub field: Vec<CreatureView>,
    pub field_capacity: usize,
    pub deck_count: usize,
    /// Withheld for the opponent.
    pub tools: Option<Vec<Tool>>,
    /// Withheld for the opponent.
    pub spells: Option<Vec<Spell>>,
    pub synergies: Vec<SynergyResult>,
    pub rating: u32,
}

impl SideView {
    fn project(side: &BattleSide, revealed: bool) -> Self {
        let hand = if revealed {
            HandView::Visible(side.hand.iter().map(CreatureView::from).collect())
        } else {
            HandView::Hidden {
                hidden_count: side.hand.len(),
            }
        };
        Self {
            id: side.id,
            energy: side.energy,
            hand,
            field: side.field.iter().map(CreatureView::from).collect(),
            field_capacity: side.field_capacity,
            deck_count: side.deck.len(),
            tools: revealed.then(|| side.tools.clone()),
            spells: revealed.then(|| side.spells.clone()),
            synergies: evaluate_synergies(&side.field, side.field_capacity),
            rating: side.rating,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct ResultView {
    pub winner_side: SideId,
    /// Signed from the viewer's perspective.
    pub rating_change: i64,
}

/// What one player is allowed to know about a battle.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct ProjectedState {
    pub is_your_turn: bool,
    pub turn: u32,
    /// Milliseconds left in the active turn window.
    pub time_remaining: u64,
    pub side: SideView,
    pub opponent: SideView,
    pub battle_log: Vec<LogEntry>,
    pub status: Phase,
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub result: Option<ResultView>,
    pub legal_actions: ActionMask,
    pub version: u64,
}

/// Projects `state` for `viewer` at time `now`.
pub fn project(state: &BattleState, viewer: SideId, now: Timestamp) -> ProjectedState {
    ProjectedState {
        is_your_turn: !state.is_completed() && state.active == viewer,
        turn: state.turn,
        time_remaining: state.time_remaining_ms(now),
        side: SideView::project(state.side(viewer), true),
        opponent: SideView::project(state.side(viewer.opponent()), false),
        battle_log: state.log.entries().to_vec(),
        status: state.phase,
        result: state.result.map(|result| ResultView {
            winner_side: result.winner,
            rating_change: result.rating_change_for(viewer),
        }),
        legal_actions: legal_kinds(state, viewer),
        version: state.version,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::engine::BattleEngine;
    use crate::state::creature::fixtures::{creature, stats};
    use crate::state::{Difficulty, SideSetup};

    fn battle() -> BattleState {
        BattleEngine::start(
            GameConfig::default(),
            Difficulty::Medium,
            SideSetup::new(vec![
                creature(1, "Emberling", stats(30, 20, 5)),
                creature(2, "Emberling", stats(30, 20, 5)),
            ]),
            SideSetup::new(vec![
                creature(10, "Mossback", stats(30, 10, 8)),
                creature(11, "Mossback", stats(30, 10, 8)),
                creature(12, "Thornling", stats(30, 10, 8)),
            ]),
            Timestamp(0),
        )
        .unwrap()
    }

    #[test]
    fn opponent_hand_is_a_count() {
        let state = battle();

        let view = project(&state, SideId::A, Timestamp(1_000));

        assert_eq!(view.side.hand.len(), 2);
        assert!(matches!(view.side.hand, HandView::Visible(_)));
        assert_eq!(view.opponent.hand, HandView::Hidden { hidden_count: 3 });
        assert!(view.opponent.tools.is_none());
        assert_eq!(view.opponent.field_capacity, 4);
        assert_eq!(view.time_remaining, 59_000);
        assert!(view.is_your_turn);
    }

    #[test]
    fn waiting_viewer_sees_only_forfeit() {
        let state = battle();
        let view = project(&state, SideId::B, Timestamp(0));
        assert!(!view.is_your_turn);
        assert_eq!(view.legal_actions, ActionMask::FORFEIT);
    }

    #[test]
    fn result_is_signed_per_viewer() {
        let mut state = battle();
        BattleEngine::new(&mut state)
            .execute(SideId::A, &crate::action::Action::Forfeit, Timestamp(0))
            .unwrap();

        let winner = project(&state, SideId::B, Timestamp(0));
        let loser = project(&state, SideId::A, Timestamp(0));

        assert_eq!(winner.result.as_ref().map(|r| r.rating_change), Some(16));
        assert_eq!(loser.result.as_ref().map(|r| r.rating_change), Some(-16));
        assert_eq!(loser.time_remaining, 0);
        assert!(!loser.is_your_turn);
    }
}
