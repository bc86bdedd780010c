//! Applies a validated in-turn action to the battle state.

use crate::state::{
    BattleState, CreatureId, SideId, SpellEffect, SpellId, SpellTarget, StatusEffectKind,
    ToolEffect, ToolId,
};
use crate::synergy::field_bonus_pct;

use super::combat::{AttackStyle, calculate_damage};
use super::{Action, ActionError, ActionKind, validate};

/// One observable consequence of a resolved action.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "type", rename_all = "camelCase"))]
pub enum Impact {
    Deployed {
        creature: CreatureId,
    },
    Damaged {
        target: CreatureId,
        amount: u32,
        synergy_pct: u32,
    },
    Healed {
        target: CreatureId,
        amount: u32,
    },
    Buffed {
        target: CreatureId,
        percent: u32,
    },
    Cleansed {
        target: CreatureId,
        removed: usize,
    },
    Stunned {
        target: CreatureId,
        turns: u32,
    },
    Defending {
        creature: CreatureId,
    },
}

/// Result of resolving one action.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct ActionOutcome {
    pub kind: ActionKind,
    pub energy_spent: u32,
    pub impacts: Vec<Impact>,
    /// Creatures removed from either field by this action.
    pub defeated: Vec<CreatureId>,
}

/// Validates and applies `action` for `side`.
///
/// On error the state is untouched. On success energy has been spent, exactly
/// one log entry has been appended and every creature at zero health has been
/// removed from its field.
pub fn resolve(
    state: &mut BattleState,
    side: SideId,
    action: &Action,
) -> Result<ActionOutcome, ActionError> {
    let cost = validate(state, side, action)?;
    if action.is_transition() {
        return Err(ActionError::NotResolvable(action.kind()));
    }
    state.side_mut(side).spend_energy(cost);

    let (impacts, message) = match action {
        Action::Deploy { creature } => deploy(state, side, *creature),
        Action::Attack {
            attacker,
            target,
            style,
        } => attack(state, side, *attacker, *target, *style),
        Action::UseTool { tool, target } => use_tool(state, side, *tool, *target),
        Action::UseSpell {
            spell,
            caster,
            target,
        } => use_spell(state, side, *spell, *caster, *target),
        Action::Defend { creature } => defend(state, side, *creature),
        Action::EndTurn | Action::Forfeit => return Err(ActionError::NotResolvable(action.kind())),
    };

    let mut defeated = state.side_mut(side.opponent()).remove_defeated();
    defeated.extend(state.side_mut(side).remove_defeated());

    let message = if defeated.is_empty() {
        message
    } else {
        let names: Vec<String> = defeated.iter().map(ToString::to_string).collect();
        format!("{message} Defeated: {}.", names.join(", "))
    };
    state.record(message);

    Ok(ActionOutcome {
        kind: action.kind(),
        energy_spent: cost,
        impacts,
        defeated,
    })
}

type Resolution = (Vec<Impact>, String);

fn deploy(state: &mut BattleState, side: SideId, id: CreatureId) -> Resolution {
    let own = state.side_mut(side);
    let mut species = String::new();
    if let Some(index) = own.hand.iter().position(|c| c.id == id) {
        let creature = own.hand.remove(index);
        species = creature.species.clone();
        own.field.push(creature);
    }
    (
        vec![Impact::Deployed { creature: id }],
        format!("{side} deploys {species} {id}."),
    )
}

fn attack(
    state: &mut BattleState,
    side: SideId,
    attacker: CreatureId,
    target: CreatureId,
    style: Option<AttackStyle>,
) -> Resolution {
    let synergy_pct = field_bonus_pct(state, side);
    let config = state.config.clone();
    let (own, enemy) = state.side_and_opponent_mut(side);

    let mut amount = 0;
    let mut style_used = AttackStyle::Physical;
    if let (Some(source), Some(defender)) =
        (own.field_creature(attacker), enemy.field_creature_mut(target))
    {
        style_used = style.unwrap_or_else(|| AttackStyle::preferred(&source.stats));
        let damage = calculate_damage(
            style_used.offense(&source.stats),
            style_used.defense(&defender.stats),
            synergy_pct,
            defender.is_defending,
            &config,
        );
        amount = defender.take_damage(damage);
    }

    (
        vec![Impact::Damaged {
            target,
            amount,
            synergy_pct,
        }],
        format!("{side}: {attacker} attacks {target} ({style_used}) for {amount} damage."),
    )
}

fn use_tool(
    state: &mut BattleState,
    side: SideId,
    tool_id: ToolId,
    target: CreatureId,
) -> Resolution {
    let own = state.side_mut(side);
    let Some(tool) = own.tool_mut(tool_id) else {
        return (Vec::new(), format!("{side} uses {tool_id}."));
    };
    tool.consumed = true;
    let (name, effect) = (tool.name.clone(), tool.effect);

    let Some(creature) = own.field_creature_mut(target) else {
        return (Vec::new(), format!("{side} uses {name}."));
    };
    match effect {
        ToolEffect::Heal(amount) => {
            let healed = creature.heal(amount);
            (
                vec![Impact::Healed {
                    target,
                    amount: healed,
                }],
                format!("{side} uses {name} on {target}, restoring {healed} health."),
            )
        }
        ToolEffect::Buff(percent) => {
            creature.buff_attack(percent);
            (
                vec![Impact::Buffed { target, percent }],
                format!("{side} uses {name} on {target}: attack +{percent}%."),
            )
        }
        ToolEffect::Cleanse => {
            let removed = creature.status.clear();
            (
                vec![Impact::Cleansed { target, removed }],
                format!("{side} uses {name} on {target}, removing {removed} effects."),
            )
        }
    }
}

fn use_spell(
    state: &mut BattleState,
    side: SideId,
    spell_id: SpellId,
    caster: CreatureId,
    target: Option<CreatureId>,
) -> Resolution {
    let Some(spell) = state.side(side).spell(spell_id).cloned() else {
        return (Vec::new(), format!("{side} casts {spell_id}."));
    };
    let turn = state.turn;

    match spell.effect {
        SpellEffect::Damage {
            power,
            target: reach,
        } => {
            let targets: Vec<CreatureId> = match (reach, target) {
                (SpellTarget::AllEnemies, _) => state
                    .side(side.opponent())
                    .field
                    .iter()
                    .map(|c| c.id)
                    .collect(),
                (SpellTarget::Single, Some(target)) => vec![target],
                (SpellTarget::Single, None) => Vec::new(),
            };

            let mut impacts = Vec::with_capacity(targets.len());
            let mut total = 0;
            for target in targets {
                let synergy_pct = field_bonus_pct(state, side);
                let config = state.config.clone();
                let (own, enemy) = state.side_and_opponent_mut(side);
                let (Some(source), Some(defender)) =
                    (own.field_creature(caster), enemy.field_creature_mut(target))
                else {
                    continue;
                };
                let damage = calculate_damage(
                    power.saturating_add(source.stats.magical_attack),
                    defender.stats.magical_defense,
                    synergy_pct,
                    defender.is_defending,
                    &config,
                );
                let amount = defender.take_damage(damage);
                total += amount;
                impacts.push(Impact::Damaged {
                    target,
                    amount,
                    synergy_pct,
                });
            }

            let message = match target {
                Some(target) if reach == SpellTarget::Single => format!(
                    "{side}: {caster} casts {} on {target} for {total} damage.",
                    spell.name
                ),
                _ => format!(
                    "{side}: {caster} casts {} on all enemies for {total} damage.",
                    spell.name
                ),
            };
            (impacts, message)
        }

        SpellEffect::Heal(amount) => {
            let target = target.unwrap_or(caster);
            let mut healed = 0;
            if let Some(ally) = state.side_mut(side).field_creature_mut(target) {
                healed = ally.heal(amount);
            }
            (
                vec![Impact::Healed {
                    target,
                    amount: healed,
                }],
                format!(
                    "{side}: {caster} casts {} on {target}, restoring {healed} health.",
                    spell.name
                ),
            )
        }

        SpellEffect::Stun(turns) => {
            let target = target.unwrap_or(caster);
            if let Some(victim) = state.side_mut(side.opponent()).field_creature_mut(target) {
                victim.apply_effect(StatusEffectKind::Stunned, turns, turn);
            }
            (
                vec![Impact::Stunned { target, turns }],
                format!(
                    "{side}: {caster} casts {} on {target}, stunned for {turns} turns.",
                    spell.name
                ),
            )
        }
    }
}

fn defend(state: &mut BattleState, side: SideId, id: CreatureId) -> Resolution {
    if let Some(creature) = state.side_mut(side).field_creature_mut(id) {
        creature.is_defending = true;
    }
    (
        vec![Impact::Defending { creature: id }],
        format!("{side}: {id} takes a defensive stance."),
    )
}
