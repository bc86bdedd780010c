//! Battle hosting and the per-battle commit path.
//!
//! Every battle has exactly one committed [`BattleState`]. A request is
//! executed against a snapshot taken under the battle's lock, then committed
//! only if nobody else committed in between (compared by
//! [`BattleState::version`]). A lost race is retried a bounded number of
//! times, after which the request runs while holding the lock. Either way a
//! request sees and produces a state that some serial order of requests
//! would have produced.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use arena_core::{
    Action, ActionRequest, BattleEngine, BattleState, Difficulty, ExecutionOutcome, GameConfig,
    LogEntry, ProjectedState, SideId, SideSetup, Timestamp, project,
};
use serde::{Deserialize, Serialize};
use tokio::sync::{Mutex, RwLock};
use tracing::{debug, info};

use crate::api::{self, Rejection, RuntimeError};
use crate::clock::{Clock, SystemClock};
use crate::config::RuntimeConfig;
use crate::events::{BattleEvent, Event, EventBus, OutcomeEvent, TurnEvent};

/// Server-assigned battle identifier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BattleId(pub u64);

impl fmt::Display for BattleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "battle#{}", self.0)
    }
}

type BattleSlot = Arc<Mutex<BattleState>>;

struct Inner {
    battles: RwLock<HashMap<BattleId, BattleSlot>>,
    next_id: AtomicU64,
    clock: Arc<dyn Clock>,
    events: EventBus,
    config: RuntimeConfig,
}

/// Hosts battles and serialises the writers of each one.
///
/// Clones share the same battles. Battles share no state with each other.
#[derive(Clone)]
pub struct BattleServer {
    inner: Arc<Inner>,
}

/// One engine step that made it into a commit.
struct Committed {
    outcome: ExecutionOutcome,
    entries: Vec<LogEntry>,
    expired: bool,
}

impl BattleServer {
    pub fn new(config: RuntimeConfig) -> Self {
        Self::with_clock(config, Arc::new(SystemClock))
    }

    pub fn with_clock(config: RuntimeConfig, clock: Arc<dyn Clock>) -> Self {
        let events = EventBus::with_capacity(config.event_buffer_size);
        Self {
            inner: Arc::new(Inner {
                battles: RwLock::new(HashMap::new()),
                next_id: AtomicU64::new(1),
                clock,
                events,
                config,
            }),
        }
    }

    pub fn config(&self) -> &RuntimeConfig {
        &self.inner.config
    }

    pub fn events(&self) -> &EventBus {
        &self.inner.events
    }

    pub fn now(&self) -> Timestamp {
        self.inner.clock.now()
    }

    /// Seeds a new battle from both sides' selections.
    ///
    /// A side that brought no creatures loses immediately; the battle is
    /// still registered so both players can read the result.
    pub async fn create_battle(
        &self,
        mut rules: GameConfig,
        difficulty: Difficulty,
        side_a: SideSetup,
        side_b: SideSetup,
    ) -> api::Result<BattleId> {
        if let Some(turn) = self.inner.config.turn_duration {
            rules = rules.with_turn_duration_ms(u64::try_from(turn.as_millis()).unwrap_or(u64::MAX));
        }
        let state = BattleEngine::start(rules, difficulty, side_a, side_b, self.now())?;
        let settled = state.result;

        let battle = BattleId(self.inner.next_id.fetch_add(1, Ordering::Relaxed));
        self.inner
            .battles
            .write()
            .await
            .insert(battle, Arc::new(Mutex::new(state)));

        info!(target: "arena::server", battle = %battle, %difficulty, "battle created");
        self.inner
            .events
            .publish(Event::Battle(BattleEvent::Created { battle, difficulty }));
        if let Some(result) = settled {
            info!(target: "arena::server", battle = %battle, winner = %result.winner, "battle settled at start");
            self.inner
                .events
                .publish(Event::Outcome(OutcomeEvent { battle, result }));
        }
        Ok(battle)
    }

    /// The battle as `player` is allowed to see it.
    pub async fn get_state(
        &self,
        battle: BattleId,
        player: SideId,
    ) -> Result<ProjectedState, Rejection> {
        let slot = self
            .slot(battle)
            .await
            .ok_or_else(|| Rejection::unknown_battle(battle))?;
        let state = slot.lock().await;
        Ok(project(&state, player, self.now()))
    }

    /// Applies `request` on behalf of `player` and returns the new projection.
    ///
    /// A turn whose window already elapsed is ended first, exactly as the
    /// timer would have; the request is then judged against the result. The
    /// hand-off is committed even when the request itself is refused.
    pub async fn submit_action(
        &self,
        battle: BattleId,
        player: SideId,
        request: ActionRequest,
    ) -> Result<ProjectedState, Rejection> {
        let slot = self
            .slot(battle)
            .await
            .ok_or_else(|| Rejection::unknown_battle(battle))?;
        let action = Action::try_from(request)
            .map_err(|error| self.refuse(battle, player, error.into()))?;

        for attempt in 1..=self.inner.config.commit_retry_limit {
            let now = self.now();
            let mut working = slot.lock().await.clone();
            let expected = working.version;
            let Attempt { expired, applied } = step(&mut working, player, &action, now);
            let applied = match (expired.is_some(), applied) {
                (false, Err(rejection)) => return Err(self.refuse(battle, player, rejection)),
                (_, applied) => applied,
            };

            match try_commit(battle, &slot, working, expected, player, now).await {
                Ok(view) => return self.settle(battle, player, expired, applied, view),
                Err(error) => {
                    debug!(target: "arena::server", battle = %battle, attempt, %error, "commit lost a race; retrying");
                }
            }
        }

        let now = self.now();
        let mut committed = slot.lock().await;
        let mut working = committed.clone();
        let Attempt { expired, applied } = step(&mut working, player, &action, now);
        if expired.is_some() || applied.is_ok() {
            *committed = working;
        }
        let view = project(&committed, player, now);
        drop(committed);

        self.settle(battle, player, expired, applied, view)
    }

    /// Ends every active turn whose window has elapsed.
    ///
    /// Returns the battles that were advanced.
    pub async fn expire_overdue(&self) -> Vec<BattleId> {
        let slots: Vec<(BattleId, BattleSlot)> = self
            .inner
            .battles
            .read()
            .await
            .iter()
            .map(|(battle, slot)| (*battle, Arc::clone(slot)))
            .collect();

        let mut expired = Vec::new();
        for (battle, slot) in slots {
            let now = self.now();
            let mut state = slot.lock().await;
            let offset = state.log.len();
            let Some(outcome) = BattleEngine::new(&mut *state).expire_turn(now) else {
                continue;
            };
            let entries = state.log.since(offset).to_vec();
            drop(state);

            self.announce(
                battle,
                vec![Committed {
                    outcome,
                    entries,
                    expired: true,
                }],
            );
            expired.push(battle);
        }
        expired
    }

    async fn slot(&self, battle: BattleId) -> Option<BattleSlot> {
        self.inner.battles.read().await.get(&battle).cloned()
    }

    /// Announces what was committed and answers the caller.
    fn settle(
        &self,
        battle: BattleId,
        player: SideId,
        expired: Option<Committed>,
        applied: Result<Committed, Rejection>,
        view: ProjectedState,
    ) -> Result<ProjectedState, Rejection> {
        let mut steps: Vec<Committed> = expired.into_iter().collect();
        let answer = match applied {
            Ok(step) => {
                steps.push(step);
                Ok(view)
            }
            Err(rejection) => Err(rejection),
        };
        self.announce(battle, steps);
        answer.map_err(|rejection| self.refuse(battle, player, rejection))
    }

    fn refuse(&self, battle: BattleId, side: SideId, rejection: Rejection) -> Rejection {
        debug!(target: "arena::server", battle = %battle, ?side, code = %rejection.code, "request rejected");
        self.inner
            .events
            .publish(Event::Battle(BattleEvent::ActionRejected {
                battle,
                side,
                code: rejection.code.clone(),
            }));
        rejection
    }

    fn announce(&self, battle: BattleId, steps: Vec<Committed>) {
        for Committed {
            outcome,
            entries,
            expired,
        } in steps
        {
            if expired {
                info!(target: "arena::server", battle = %battle, side = ?outcome.side, "turn window elapsed");
            }
            debug!(
                target: "arena::server",
                battle = %battle,
                side = ?outcome.side,
                kind = %outcome.kind,
                version = outcome.version,
                "committed"
            );
            self.inner
                .events
                .publish(Event::Battle(BattleEvent::ActionApplied {
                    battle,
                    side: outcome.side,
                    kind: outcome.kind,
                    version: outcome.version,
                    entries,
                }));

            if let Some(turn_start) = &outcome.turn_start {
                self.inner.events.publish(Event::Turn(TurnEvent {
                    battle,
                    side: turn_start.side,
                    turn: turn_start.turn,
                    expired,
                }));
            }

            if let Some(result) = outcome.result {
                info!(
                    target: "arena::server",
                    battle = %battle,
                    winner = %result.winner,
                    reason = %result.reason,
                    rating_delta = result.rating_delta,
                    "battle completed"
                );
                self.inner
                    .events
                    .publish(Event::Outcome(OutcomeEvent { battle, result }));
            }
        }
    }
}

/// What one request did to a working copy.
struct Attempt {
    /// Overdue hand-off performed before the request, if any.
    expired: Option<Committed>,
    applied: Result<Committed, Rejection>,
}

/// Runs one request against `state`, ending an overdue turn first.
///
/// A refused request leaves `state` as the hand-off left it.
fn step(state: &mut BattleState, player: SideId, action: &Action, now: Timestamp) -> Attempt {
    let offset = state.log.len();
    let expired = BattleEngine::new(state).expire_turn(now);
    let expired = expired.map(|outcome| Committed {
        outcome,
        entries: state.log.since(offset).to_vec(),
        expired: true,
    });

    let offset = state.log.len();
    let executed = BattleEngine::new(state).execute(player, action, now);
    let applied = executed.map_err(Rejection::from).map(|outcome| Committed {
        outcome,
        entries: state.log.since(offset).to_vec(),
        expired: false,
    });

    Attempt { expired, applied }
}

async fn try_commit(
    battle: BattleId,
    slot: &Mutex<BattleState>,
    working: BattleState,
    expected: u64,
    viewer: SideId,
    now: Timestamp,
) -> api::Result<ProjectedState> {
    let mut committed = slot.lock().await;
    if committed.version != expected {
        return Err(RuntimeError::StateConflict {
            battle,
            expected,
            found: committed.version,
        });
    }
    *committed = working;
    Ok(project(&committed, viewer, now))
}
