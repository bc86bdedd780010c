//! Turn/phase state machine and action execution.
//!
//! The [`BattleEngine`] is the authoritative reducer for [`BattleState`]. It
//! checks phase and turn ownership, routes in-turn actions to the resolver,
//! sequences turn hand-offs and detects the end of the battle. Every
//! successful call bumps [`BattleState::version`].

mod errors;
mod outcome;
mod turns;

pub use errors::ExecuteError;
pub use outcome::{BattleResult, EndReason, RATING_K_FACTOR, exhausted_side, rating_delta};
pub use turns::TurnStart;

use crate::action::{self, Action, ActionKind, ActionOutcome};
use crate::config::GameConfig;
use crate::state::{BattleState, Difficulty, SetupError, SideId, SideSetup, Timestamp};

/// Everything one engine step produced.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct ExecutionOutcome {
    pub side: SideId,
    pub kind: ActionKind,
    /// Set for in-turn actions.
    pub action: Option<ActionOutcome>,
    /// Set when control passed to the other side.
    pub turn_start: Option<TurnStart>,
    /// Set when this step completed the battle.
    pub result: Option<BattleResult>,
    pub version: u64,
}

/// Reducer over a borrowed battle state.
pub struct BattleEngine<'a> {
    state: &'a mut BattleState,
}

impl<'a> BattleEngine<'a> {
    pub fn new(state: &'a mut BattleState) -> Self {
        Self { state }
    }

    /// Seeds a battle and settles it immediately if a side brought nothing.
    pub fn start(
        config: GameConfig,
        difficulty: Difficulty,
        side_a: SideSetup,
        side_b: SideSetup,
        now: Timestamp,
    ) -> Result<BattleState, SetupError> {
        let mut state = BattleState::new(config, difficulty, side_a, side_b, now)?;
        BattleEngine::new(&mut state).settle(SideId::A);
        Ok(state)
    }

    pub fn state(&self) -> &BattleState {
        self.state
    }

    /// Executes `action` on behalf of `side` at wall-clock time `now`.
    ///
    /// Forfeit is accepted from either side; everything else only from the
    /// active side. Rejections leave the state untouched.
    pub fn execute(
        &mut self,
        side: SideId,
        action: &Action,
        now: Timestamp,
    ) -> Result<ExecutionOutcome, ExecuteError> {
        if self.state.is_completed() {
            return Err(ExecuteError::BattleCompleted);
        }

        if let Action::Forfeit = action {
            self.state.record(format!("{side} forfeits."));
            let result = outcome::finish(self.state, side.opponent(), EndReason::Forfeit);
            return Ok(self.commit(side, ActionKind::Forfeit, None, None, Some(result)));
        }

        if side != self.state.active {
            return Err(ExecuteError::NotYourTurn {
                active: self.state.active,
            });
        }

        if let Action::EndTurn = action {
            let turn = self.state.turn;
            self.state.record(format!("{side} ends turn {turn}."));
            let turn_start = self.pass_turn(now);
            let result = self.settle(side);
            return Ok(self.commit(side, ActionKind::EndTurn, None, Some(turn_start), result));
        }

        let resolved = action::resolve(self.state, side, action)?;
        let result = self.settle(side);
        Ok(self.commit(side, action.kind(), Some(resolved), None, result))
    }

    /// Ends the active turn if its window has elapsed at `now`.
    ///
    /// This is the only mutation the engine performs without a player
    /// request. Returns `None` when nothing was due.
    pub fn expire_turn(&mut self, now: Timestamp) -> Option<ExecutionOutcome> {
        if self.state.is_completed() || !self.state.window.is_expired(now) {
            return None;
        }

        let side = self.state.active;
        let turn = self.state.turn;
        self.state
            .record(format!("{side} ran out of time; turn {turn} ends."));
        let turn_start = self.pass_turn(now);
        let result = self.settle(side);
        Some(self.commit(side, ActionKind::EndTurn, None, Some(turn_start), result))
    }

    /// Completes the battle if a side has been exhausted.
    fn settle(&mut self, last_actor: SideId) -> Option<BattleResult> {
        if self.state.is_completed() {
            return self.state.result;
        }
        let loser = exhausted_side(self.state, last_actor)?;
        Some(outcome::finish(
            self.state,
            loser.opponent(),
            EndReason::Defeat,
        ))
    }

    fn commit(
        &mut self,
        side: SideId,
        kind: ActionKind,
        action: Option<ActionOutcome>,
        turn_start: Option<TurnStart>,
        result: Option<BattleResult>,
    ) -> ExecutionOutcome {
        self.state.version += 1;
        ExecutionOutcome {
            side,
            kind,
            action,
            turn_start,
            result,
            version: self.state.version,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::{ActionError, AttackStyle};
    use crate::state::creature::fixtures::{creature, stats};
    use crate::state::{CreatureId, Phase, Spell, SpellEffect, SpellId, StatusEffectKind};

    const T0: Timestamp = Timestamp(0);

    fn start(a: SideSetup, b: SideSetup) -> BattleState {
        BattleEngine::start(GameConfig::default(), Difficulty::Easy, a, b, T0).unwrap()
    }

    fn duel() -> BattleState {
        start(
            SideSetup::new(vec![creature(1, "Emberling", stats(30, 20, 5))]),
            SideSetup::new(vec![creature(10, "Mossback", stats(30, 10, 8))]),
        )
    }

    fn run(state: &mut BattleState, side: SideId, action: Action) -> ExecutionOutcome {
        BattleEngine::new(state).execute(side, &action, T0).unwrap()
    }

    fn deploy(id: u32) -> Action {
        Action::Deploy {
            creature: CreatureId(id),
        }
    }

    #[test]
    fn side_without_creatures_loses_at_start() {
        let state = start(
            SideSetup::new(vec![creature(1, "Emberling", stats(30, 20, 5))]),
            SideSetup::default(),
        );

        assert_eq!(state.phase, Phase::Completed);
        let result = state.result.unwrap();
        assert_eq!(result.winner, SideId::A);
        assert_eq!(result.reason, EndReason::Defeat);
    }

    #[test]
    fn only_active_side_may_act() {
        let mut state = duel();
        let before = state.clone();

        let error = BattleEngine::new(&mut state)
            .execute(SideId::B, &deploy(10), T0)
            .unwrap_err();

        assert_eq!(error, ExecuteError::NotYourTurn { active: SideId::A });
        assert_eq!(state, before);
    }

    #[test]
    fn end_turn_hands_off_and_counts_turns() {
        let mut state = duel();

        let outcome = run(&mut state, SideId::A, Action::EndTurn);
        let turn_start = outcome.turn_start.unwrap();
        assert_eq!(state.active, SideId::B);
        assert_eq!(state.turn, 1);
        assert_eq!(turn_start.energy_gained, 3);
        assert_eq!(state.side(SideId::B).energy, 8);

        run(&mut state, SideId::B, Action::EndTurn);
        assert_eq!(state.active, SideId::A);
        assert_eq!(state.turn, 2);
        assert_eq!(state.side(SideId::A).energy, 8);
        assert_eq!(state.version, 2);
    }

    #[test]
    fn energy_is_capped() {
        let mut state = duel();
        for _ in 0..3 {
            run(&mut state, SideId::A, Action::EndTurn);
            run(&mut state, SideId::B, Action::EndTurn);
        }
        assert_eq!(state.side(SideId::A).energy, 10);
        assert_eq!(state.side(SideId::B).energy, 10);
    }

    #[test]
    fn defend_stance_ends_at_owners_next_turn() {
        let mut state = duel();
        run(&mut state, SideId::A, deploy(1));
        run(&mut state, SideId::A, Action::EndTurn);
        run(&mut state, SideId::B, deploy(10));
        run(
            &mut state,
            SideId::B,
            Action::Defend {
                creature: CreatureId(10),
            },
        );
        run(&mut state, SideId::B, Action::EndTurn);

        let outcome = run(
            &mut state,
            SideId::A,
            Action::Attack {
                attacker: CreatureId(1),
                target: CreatureId(10),
                style: Some(AttackStyle::Physical),
            },
        );
        let health = state.side(SideId::B).field_creature(CreatureId(10)).unwrap().health();
        assert_eq!(health, 24);
        assert_eq!(outcome.action.unwrap().energy_spent, 2);

        run(&mut state, SideId::A, Action::EndTurn);
        let defender = state.side(SideId::B).field_creature(CreatureId(10)).unwrap();
        assert!(!defender.is_defending);
    }

    #[test]
    fn stun_wears_off_at_victims_next_turn_start() {
        let mut cheap = stats(30, 20, 5);
        cheap.energy_cost = 2;
        let a = SideSetup::new(vec![creature(1, "Emberling", cheap)])
            .with_spells(vec![Spell::new(SpellId(1), "Daze", SpellEffect::Stun(1))]);
        let mut state = start(
            a,
            SideSetup::new(vec![creature(10, "Mossback", stats(30, 10, 8))]),
        );
        run(&mut state, SideId::A, Action::EndTurn);
        run(&mut state, SideId::B, deploy(10));
        run(&mut state, SideId::B, Action::EndTurn);
        run(&mut state, SideId::A, deploy(1));
        run(
            &mut state,
            SideId::A,
            Action::UseSpell {
                spell: SpellId(1),
                caster: CreatureId(1),
                target: Some(CreatureId(10)),
            },
        );
        let stunned = |state: &BattleState| {
            state
                .side(SideId::B)
                .field_creature(CreatureId(10))
                .unwrap()
                .status
                .has(StatusEffectKind::Stunned)
        };
        assert!(stunned(&state));

        let outcome = run(&mut state, SideId::A, Action::EndTurn);
        assert!(!stunned(&state));
        assert_eq!(outcome.turn_start.unwrap().recovered, vec![CreatureId(10)]);
    }

    #[test]
    fn stunned_creature_may_only_end_turn() {
        let mut state = duel();
        run(&mut state, SideId::A, deploy(1));
        state
            .side_mut(SideId::A)
            .field_creature_mut(CreatureId(1))
            .unwrap()
            .apply_effect(StatusEffectKind::Stunned, 1, 1);

        let error = BattleEngine::new(&mut state)
            .execute(
                SideId::A,
                &Action::Defend {
                    creature: CreatureId(1),
                },
                T0,
            )
            .unwrap_err();
        assert!(matches!(
            error,
            ExecuteError::Action(ActionError::CannotAct { .. })
        ));

        run(&mut state, SideId::A, Action::EndTurn);
        assert_eq!(state.active, SideId::B);
    }

    #[test]
    fn defeating_last_creature_ends_battle() {
        let mut state = start(
            SideSetup::new(vec![creature(1, "Emberling", stats(30, 40, 5))]),
            SideSetup::new(vec![creature(10, "Mossback", stats(30, 10, 8))]),
        );
        run(&mut state, SideId::A, Action::EndTurn);
        run(&mut state, SideId::B, deploy(10));
        run(&mut state, SideId::B, Action::EndTurn);
        run(&mut state, SideId::A, deploy(1));

        let outcome = run(
            &mut state,
            SideId::A,
            Action::Attack {
                attacker: CreatureId(1),
                target: CreatureId(10),
                style: None,
            },
        );

        let result = outcome.result.unwrap();
        assert_eq!(result.winner, SideId::A);
        assert_eq!(result.reason, EndReason::Defeat);
        assert_eq!(result.rating_delta, 16);
        assert!(state.is_completed());
        assert_eq!(state.side(SideId::A).rating, 1216);
        assert_eq!(state.side(SideId::B).rating, 1184);

        let error = BattleEngine::new(&mut state)
            .execute(SideId::B, &Action::EndTurn, T0)
            .unwrap_err();
        assert_eq!(error, ExecuteError::BattleCompleted);
    }

    #[test]
    fn forfeit_is_accepted_out_of_turn() {
        let mut state = duel();

        let outcome = run(&mut state, SideId::B, Action::Forfeit);

        let result = outcome.result.unwrap();
        assert_eq!(result.winner, SideId::A);
        assert_eq!(result.reason, EndReason::Forfeit);
        assert!(state.is_completed());
    }

    #[test]
    fn timer_expiry_logs_implicit_end_turn() {
        let mut state = duel();
        let deadline = state.window.deadline();

        assert!(
            BattleEngine::new(&mut state)
                .expire_turn(Timestamp(deadline.0 - 1))
                .is_none()
        );

        let outcome = BattleEngine::new(&mut state).expire_turn(deadline).unwrap();

        assert_eq!(outcome.kind, ActionKind::EndTurn);
        assert_eq!(state.active, SideId::B);
        assert_eq!(state.window.started_at, deadline);
        let entry = state.log.last().unwrap();
        assert!(entry.message.contains("ran out of time"), "{}", entry.message);
    }

    #[test]
    fn hand_refills_from_deck_at_turn_start() {
        let creatures = (1..=5)
            .map(|i| creature(i, "Emberling", stats(30, 20, 5)))
            .collect();
        let a = SideSetup::new(creatures);
        let mut state = start(
            a,
            SideSetup::new(vec![creature(10, "Mossback", stats(30, 10, 8))]),
        );
        // hand starts full, so nothing is left in the deck
        assert_eq!(state.side(SideId::A).hand.len(), 5);
        assert!(state.side(SideId::A).deck.is_empty());

        state.side_mut(SideId::A).deck.push(creature(6, "Emberling", stats(30, 20, 5)));
        run(&mut state, SideId::A, deploy(1));
        run(&mut state, SideId::A, Action::EndTurn);
        let outcome = run(&mut state, SideId::B, Action::EndTurn);

        assert_eq!(outcome.turn_start.unwrap().drawn, 1);
        assert!(state.side(SideId::A).hand_creature(CreatureId(6)).is_some());
    }
}
