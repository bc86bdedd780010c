//! Greedy AI that plays from its own projection.

use arena_core::{
    ActionKind, ActionMask, ActionRequest, CreatureView, GameConfig, HandView, ProjectedState,
    SideView, SpellEffect, SpellTarget,
};
use async_trait::async_trait;

use crate::api::{ActionProvider, Result};

/// Picks the most immediately useful action, in priority order:
///
/// 1. deploy the strongest affordable creature while the field has room
/// 2. attack the weakest enemy with the strongest creature that can act
/// 3. cast a damage spell from that same creature
/// 4. end the turn
///
/// Every choice is derived from the viewer's projection only.
#[derive(Debug, Clone)]
pub struct GreedyProvider {
    rules: GameConfig,
}

impl GreedyProvider {
    pub fn new(rules: GameConfig) -> Self {
        Self { rules }
    }

    pub fn choose(&self, view: &ProjectedState) -> ActionRequest {
        let own = &view.side;
        let legal = view.legal_actions;

        if legal.contains(ActionMask::DEPLOY) {
            if let Some(card) = strongest_affordable(own) {
                return ActionRequest {
                    creature_id: Some(card.id),
                    ..ActionRequest::new(ActionKind::Deploy)
                };
            }
        }

        let attacker = own
            .field
            .iter()
            .filter(|creature| can_act(creature))
            .max_by_key(|creature| (creature.stats.offense(), creature.health));
        let target = view
            .opponent
            .field
            .iter()
            .min_by_key(|creature| (creature.health, creature.stats.defense()));

        if let (Some(attacker), Some(target)) = (attacker, target) {
            if legal.contains(ActionMask::ATTACK) && own.energy >= self.rules.attack_cost {
                return ActionRequest {
                    creature_id: Some(attacker.id),
                    target_id: Some(target.id),
                    ..ActionRequest::new(ActionKind::Attack)
                };
            }

            if legal.contains(ActionMask::USE_SPELL) && own.energy >= self.rules.spell_cost {
                let damage = own.spells.iter().flatten().find_map(|spell| match spell.effect {
                    SpellEffect::Damage { target: reach, .. } => Some((spell.id, reach)),
                    _ => None,
                });
                if let Some((spell, reach)) = damage {
                    return ActionRequest {
                        creature_id: Some(attacker.id),
                        spell_id: Some(spell),
                        target_id: (reach == SpellTarget::Single).then_some(target.id),
                        ..ActionRequest::new(ActionKind::UseSpell)
                    };
                }
            }
        }

        ActionRequest::new(ActionKind::EndTurn)
    }
}

#[async_trait]
impl ActionProvider for GreedyProvider {
    async fn provide_action(&self, view: &ProjectedState) -> Result<ActionRequest> {
        let request = self.choose(view);
        tracing::debug!(target: "arena::client", side = ?view.side.id, kind = %request.kind, "greedy choice");
        Ok(request)
    }
}

fn can_act(creature: &CreatureView) -> bool {
    !creature
        .status
        .iter()
        .any(|effect| effect.kind.prevents_actions())
}

fn strongest_affordable(side: &SideView) -> Option<&CreatureView> {
    if side.field.len() >= side.field_capacity {
        return None;
    }
    let HandView::Visible(cards) = &side.hand else {
        return None;
    };
    cards
        .iter()
        .filter(|card| card.stats.energy_cost <= side.energy)
        .max_by_key(|card| card.stats.offense())
}

#[cfg(test)]
mod tests {
    use arena_core::{
        Action, BattleEngine, BattleState, BattleStats, Creature, CreatureId, Difficulty, Form,
        Growth, Rarity, SideId, SideSetup, Spell, SpellId, Timestamp, project,
    };

    use super::*;

    fn creature(id: u32, attack: u32, energy_cost: u32) -> Creature {
        Creature::new(
            CreatureId(id),
            "Gloomwing",
            Growth::new(Form(1), Rarity::Common, 0),
            BattleStats {
                max_health: 40,
                physical_attack: attack,
                magical_attack: attack / 2,
                physical_defense: 5,
                magical_defense: 5,
                initiative: 10,
                energy_cost,
            },
        )
    }

    fn battle(a: Vec<Creature>, b: Vec<Creature>) -> BattleState {
        let firestorm = Spell::new(
            SpellId(1),
            "Firestorm",
            SpellEffect::Damage {
                power: 6,
                target: SpellTarget::AllEnemies,
            },
        );
        BattleEngine::start(
            GameConfig::default(),
            Difficulty::Easy,
            SideSetup::new(a).with_spells(vec![firestorm]),
            SideSetup::new(b),
            Timestamp(0),
        )
        .unwrap()
    }

    fn play(state: &mut BattleState, side: SideId, action: Action) {
        BattleEngine::new(state)
            .execute(side, &action, Timestamp(0))
            .unwrap();
    }

    fn provider() -> GreedyProvider {
        GreedyProvider::new(GameConfig::default())
    }

    #[test]
    fn deploys_strongest_affordable_creature() {
        let state = battle(
            vec![creature(1, 10, 3), creature(2, 30, 3), creature(3, 50, 9)],
            vec![creature(10, 10, 3)],
        );

        let request = provider().choose(&project(&state, SideId::A, Timestamp(0)));

        assert_eq!(request.kind, ActionKind::Deploy);
        assert_eq!(request.creature_id, Some(CreatureId(2)));
    }

    #[test]
    fn attacks_weakest_enemy_once_deployed() {
        let mut state = battle(
            vec![creature(1, 20, 3)],
            vec![creature(10, 10, 3), creature(11, 10, 3)],
        );
        play(&mut state, SideId::A, Action::Deploy { creature: CreatureId(1) });
        play(&mut state, SideId::A, Action::EndTurn);
        play(&mut state, SideId::B, Action::Deploy { creature: CreatureId(10) });
        play(&mut state, SideId::B, Action::Deploy { creature: CreatureId(11) });
        state.side_mut(SideId::B).field[1].take_damage(15);
        play(&mut state, SideId::B, Action::EndTurn);

        let request = provider().choose(&project(&state, SideId::A, Timestamp(0)));

        assert_eq!(request.kind, ActionKind::Attack);
        assert_eq!(request.creature_id, Some(CreatureId(1)));
        assert_eq!(request.target_id, Some(CreatureId(11)));
    }

    #[test]
    fn casts_area_spell_without_target() {
        let mut state = battle(vec![creature(1, 20, 3)], vec![creature(10, 10, 3)]);
        play(&mut state, SideId::A, Action::Deploy { creature: CreatureId(1) });
        play(&mut state, SideId::A, Action::EndTurn);
        play(&mut state, SideId::B, Action::Deploy { creature: CreatureId(10) });
        play(&mut state, SideId::B, Action::EndTurn);

        let provider = GreedyProvider::new(GameConfig {
            attack_cost: 9,
            ..GameConfig::default()
        });
        let request = provider.choose(&project(&state, SideId::A, Timestamp(0)));

        assert_eq!(request.kind, ActionKind::UseSpell);
        assert_eq!(request.spell_id, Some(SpellId(1)));
        assert_eq!(request.target_id, None);
    }

    #[test]
    fn ends_turn_when_nothing_is_in_reach() {
        let mut state = battle(vec![creature(1, 20, 5)], vec![creature(10, 10, 3)]);
        play(&mut state, SideId::A, Action::Deploy { creature: CreatureId(1) });

        let request = provider().choose(&project(&state, SideId::A, Timestamp(0)));

        assert_eq!(request.kind, ActionKind::EndTurn);
    }
}
