//! Legality checks. Each check reads the state only and returns the energy the
//! action will cost, so the resolver and [`super::available_actions`] agree on
//! what is legal.

use crate::state::{BattleSide, BattleState, Creature, CreatureId, SideId, SpellEffect, SpellTarget};

use super::{Action, ActionError};

/// Validates `action` for `side` and returns its energy cost.
///
/// Turn ownership and battle phase are checked by the engine, not here.
pub fn validate(state: &BattleState, side: SideId, action: &Action) -> Result<u32, ActionError> {
    let own = state.side(side);
    let enemy = state.side(side.opponent());
    let config = &state.config;

    let cost = match action {
        Action::Deploy { creature } => {
            let candidate = match own.hand_creature(*creature) {
                Some(candidate) => candidate,
                None if own.field_creature(*creature).is_some() => {
                    return Err(ActionError::AlreadyDeployed(*creature));
                }
                None => return Err(ActionError::NotInHand(*creature)),
            };
            if own.is_field_full() {
                return Err(ActionError::FieldFull {
                    capacity: own.field_capacity,
                });
            }
            candidate.stats.energy_cost
        }

        Action::Attack {
            attacker, target, ..
        } => {
            ready_on_field(own, *attacker)?;
            enemy_on_field(enemy, *target)?;
            config.attack_cost
        }

        Action::UseTool { tool, target } => {
            let tool = own.tool(*tool).ok_or(ActionError::ToolNotFound(*tool))?;
            if tool.consumed {
                return Err(ActionError::ToolConsumed(tool.id));
            }
            ally_on_field(own, *target)?;
            0
        }

        Action::UseSpell {
            spell,
            caster,
            target,
        } => {
            let spell = own.spell(*spell).ok_or(ActionError::SpellNotFound(*spell))?;
            ready_on_field(own, *caster)?;
            match spell.effect {
                SpellEffect::Damage {
                    target: SpellTarget::AllEnemies,
                    ..
                } => {
                    if enemy.field.is_empty() {
                        return Err(ActionError::MissingTarget);
                    }
                }
                SpellEffect::Damage { .. } | SpellEffect::Stun(_) => {
                    enemy_on_field(enemy, target.ok_or(ActionError::MissingTarget)?)?;
                }
                SpellEffect::Heal(_) => {
                    ally_on_field(own, target.ok_or(ActionError::MissingTarget)?)?;
                }
            }
            config.spell_cost
        }

        Action::Defend { creature } => {
            let defender = ready_on_field(own, *creature)?;
            if defender.is_defending {
                return Err(ActionError::AlreadyDefending(*creature));
            }
            config.defend_cost
        }

        Action::EndTurn | Action::Forfeit => 0,
    };

    if cost > own.energy {
        return Err(ActionError::InsufficientEnergy {
            required: cost,
            available: own.energy,
        });
    }
    Ok(cost)
}

/// A friendly field creature that is able to act.
fn ready_on_field(side: &BattleSide, id: CreatureId) -> Result<&Creature, ActionError> {
    let creature = side
        .field_creature(id)
        .ok_or(ActionError::NotOnField(id))?;
    creature
        .can_act()
        .map_err(|reason| ActionError::CannotAct {
            creature: id,
            reason,
        })?;
    Ok(creature)
}

fn ally_on_field(side: &BattleSide, id: CreatureId) -> Result<&Creature, ActionError> {
    side.field_creature(id)
        .ok_or(ActionError::AllyNotFound(id))
}

fn enemy_on_field(side: &BattleSide, id: CreatureId) -> Result<&Creature, ActionError> {
    side.field_creature(id)
        .ok_or(ActionError::TargetNotFound(id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::state::creature::fixtures::{creature, stats};
    use crate::state::{
        CannotAct, Difficulty, SideSetup, Spell, SpellId, StatusEffectKind, Timestamp, Tool,
        ToolEffect, ToolId,
    };
    use crate::action::available_actions;

    fn battle() -> BattleState {
        let a = SideSetup::new(vec![
            creature(1, "Emberling", stats(30, 20, 5)),
            creature(2, "Emberling", stats(30, 20, 5)),
        ])
        .with_tools(vec![Tool::new(ToolId(1), "Salve", ToolEffect::Heal(10))]);
        let b = SideSetup::new(vec![creature(10, "Mossback", stats(30, 10, 8))]);
        BattleState::new(GameConfig::default(), Difficulty::Easy, a, b, Timestamp(0)).unwrap()
    }

    fn deploy(state: &mut BattleState, side: SideId, id: u32) {
        let own = state.side_mut(side);
        let index = own.hand.iter().position(|c| c.id == CreatureId(id)).unwrap();
        let creature = own.hand.remove(index);
        own.field.push(creature);
    }

    #[test]
    fn deploy_costs_creature_energy() {
        let state = battle();
        assert_eq!(
            validate(&state, SideId::A, &Action::Deploy { creature: CreatureId(1) }),
            Ok(5)
        );
    }

    #[test]
    fn second_deploy_of_same_creature_is_rejected() {
        let mut state = battle();
        deploy(&mut state, SideId::A, 1);

        assert_eq!(
            validate(&state, SideId::A, &Action::Deploy { creature: CreatureId(1) }),
            Err(ActionError::AlreadyDeployed(CreatureId(1)))
        );
    }

    #[test]
    fn unaffordable_action_is_rejected() {
        let mut state = battle();
        state.side_mut(SideId::A).energy = 4;

        assert_eq!(
            validate(&state, SideId::A, &Action::Deploy { creature: CreatureId(1) }),
            Err(ActionError::InsufficientEnergy {
                required: 5,
                available: 4
            })
        );
    }

    #[test]
    fn stunned_attacker_is_rejected() {
        let mut state = battle();
        deploy(&mut state, SideId::A, 1);
        deploy(&mut state, SideId::B, 10);
        state
            .side_mut(SideId::A)
            .field_creature_mut(CreatureId(1))
            .unwrap()
            .apply_effect(StatusEffectKind::Stunned, 1, 1);

        let attack = Action::Attack {
            attacker: CreatureId(1),
            target: CreatureId(10),
            style: None,
        };
        assert_eq!(
            validate(&state, SideId::A, &attack),
            Err(ActionError::CannotAct {
                creature: CreatureId(1),
                reason: CannotAct::Incapacitated(StatusEffectKind::Stunned),
            })
        );
        assert_eq!(validate(&state, SideId::A, &Action::EndTurn), Ok(0));
    }

    #[test]
    fn attack_needs_enemy_on_field() {
        let mut state = battle();
        deploy(&mut state, SideId::A, 1);

        let attack = Action::Attack {
            attacker: CreatureId(1),
            target: CreatureId(10),
            style: None,
        };
        assert_eq!(
            validate(&state, SideId::A, &attack),
            Err(ActionError::TargetNotFound(CreatureId(10)))
        );
    }

    #[test]
    fn consumed_tool_is_rejected() {
        let mut state = battle();
        deploy(&mut state, SideId::A, 1);
        state.side_mut(SideId::A).tool_mut(ToolId(1)).unwrap().consumed = true;

        let use_tool = Action::UseTool {
            tool: ToolId(1),
            target: CreatureId(1),
        };
        assert_eq!(
            validate(&state, SideId::A, &use_tool),
            Err(ActionError::ToolConsumed(ToolId(1)))
        );
    }

    #[test]
    fn area_spell_needs_an_enemy_field() {
        let mut state = battle();
        deploy(&mut state, SideId::A, 1);
        state.side_mut(SideId::A).spells.push(Spell::new(
            SpellId(1),
            "Firestorm",
            SpellEffect::Damage {
                power: 6,
                target: SpellTarget::AllEnemies,
            },
        ));
        let cast = Action::UseSpell {
            spell: SpellId(1),
            caster: CreatureId(1),
            target: None,
        };

        assert_eq!(
            validate(&state, SideId::A, &cast),
            Err(ActionError::MissingTarget)
        );
        assert!(!available_actions(&state, SideId::A).contains(&cast));

        deploy(&mut state, SideId::B, 10);
        assert_eq!(validate(&state, SideId::A, &cast), Ok(4));
    }
}
