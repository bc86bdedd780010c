//! Enumerates the concrete actions a side may legally take right now.
//!
//! Candidates are generated from the side's hand, field, loadout and the
//! opposing field, then filtered through [`validate`], so the list never
//! disagrees with the resolver.

use bitflags::bitflags;

use crate::state::{BattleState, CreatureId, SideId, SpellEffect, SpellTarget};

use super::{Action, ActionKind, validate};

bitflags! {
    /// Set of action kinds, used to summarise what a side can do.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    #[cfg_attr(feature = "serde", serde(transparent))]
    pub struct ActionMask: u8 {
        const DEPLOY = 1 << 0;
        const ATTACK = 1 << 1;
        const USE_TOOL = 1 << 2;
        const USE_SPELL = 1 << 3;
        const DEFEND = 1 << 4;
        const END_TURN = 1 << 5;
        const FORFEIT = 1 << 6;
    }
}

impl From<ActionKind> for ActionMask {
    fn from(kind: ActionKind) -> Self {
        match kind {
            ActionKind::Deploy => ActionMask::DEPLOY,
            ActionKind::Attack => ActionMask::ATTACK,
            ActionKind::UseTool => ActionMask::USE_TOOL,
            ActionKind::UseSpell => ActionMask::USE_SPELL,
            ActionKind::Defend => ActionMask::DEFEND,
            ActionKind::EndTurn => ActionMask::END_TURN,
            ActionKind::Forfeit => ActionMask::FORFEIT,
        }
    }
}

impl FromIterator<ActionKind> for ActionMask {
    fn from_iter<I: IntoIterator<Item = ActionKind>>(iter: I) -> Self {
        iter.into_iter()
            .fold(ActionMask::empty(), |mask, kind| mask | ActionMask::from(kind))
    }
}

/// Every legal action for `side`.
///
/// A completed battle has none. A side waiting for its opponent may only
/// forfeit.
pub fn available_actions(state: &BattleState, side: SideId) -> Vec<Action> {
    if state.is_completed() {
        return Vec::new();
    }
    if state.active != side {
        return vec![Action::Forfeit];
    }

    candidates(state, side)
        .into_iter()
        .filter(|action| validate(state, side, action).is_ok())
        .collect()
}

/// Kinds present in [`available_actions`].
pub fn legal_kinds(state: &BattleState, side: SideId) -> ActionMask {
    available_actions(state, side)
        .iter()
        .map(Action::kind)
        .collect()
}

fn candidates(state: &BattleState, side: SideId) -> Vec<Action> {
    let own = state.side(side);
    let enemy = state.side(side.opponent());
    let allies: Vec<CreatureId> = own.field.iter().map(|c| c.id).collect();
    let enemies: Vec<CreatureId> = enemy.field.iter().map(|c| c.id).collect();

    let mut actions: Vec<Action> = own
        .hand
        .iter()
        .map(|c| Action::Deploy { creature: c.id })
        .collect();

    for &attacker in &allies {
        actions.extend(enemies.iter().map(|&target| Action::Attack {
            attacker,
            target,
            style: None,
        }));
    }

    for tool in &own.tools {
        actions.extend(allies.iter().map(|&target| Action::UseTool {
            tool: tool.id,
            target,
        }));
    }

    for spell in &own.spells {
        for &caster in &allies {
            let targets: Vec<Option<CreatureId>> = match spell.effect {
                SpellEffect::Damage {
                    target: SpellTarget::AllEnemies,
                    ..
                } => vec![None],
                SpellEffect::Damage { .. } | SpellEffect::Stun(_) => {
                    enemies.iter().copied().map(Some).collect()
                }
                SpellEffect::Heal(_) => allies.iter().copied().map(Some).collect(),
            };
            actions.extend(targets.into_iter().map(|target| Action::UseSpell {
                spell: spell.id,
                caster,
                target,
            }));
        }
    }

    actions.extend(allies.iter().map(|&creature| Action::Defend { creature }));
    actions.push(Action::EndTurn);
    actions.push(Action::Forfeit);
    actions
}
