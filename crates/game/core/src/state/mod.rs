//! Authoritative battle state representation.
//!
//! This module owns the data structures describing both sides, their
//! creatures, the turn window and the battle log. Runtime layers clone or
//! project this state but mutate it exclusively through the engine.

pub mod creature;
pub mod loadout;
pub mod log;
pub mod side;
pub mod status;

use std::collections::HashSet;
use std::fmt;

pub use creature::{Creature, CreatureId};
pub use loadout::{Spell, SpellEffect, SpellId, SpellTarget, Tool, ToolEffect, ToolId};
pub use log::{BattleLog, LogEntry};
pub use side::{BattleSide, Difficulty, SideSetup};
pub use status::{CannotAct, StatusEffect, StatusEffectKind, StatusEffects};

use crate::config::GameConfig;
use crate::engine::BattleResult;
use crate::error::{ErrorSeverity, GameError};

/// One of the two competing sides. `A` is the player side and moves first.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SideId {
    A,
    B,
}

impl SideId {
    pub const fn opponent(self) -> Self {
        match self {
            SideId::A => SideId::B,
            SideId::B => SideId::A,
        }
    }

    const fn index(self) -> usize {
        match self {
            SideId::A => 0,
            SideId::B => 1,
        }
    }
}

impl fmt::Display for SideId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SideId::A => f.write_str("side A"),
            SideId::B => f.write_str("side B"),
        }
    }
}

/// Battle lifecycle phase.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Phase {
    #[default]
    Active,
    Completed,
}

/// Wall-clock instant in milliseconds, supplied by the caller's clock.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Timestamp(pub u64);

impl Timestamp {
    pub const fn saturating_add_ms(self, ms: u64) -> Self {
        Self(self.0.saturating_add(ms))
    }
}

/// Deadline bookkeeping for the active turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct TurnWindow {
    pub started_at: Timestamp,
    pub duration_ms: u64,
}

impl TurnWindow {
    pub fn new(started_at: Timestamp, duration_ms: u64) -> Self {
        Self {
            started_at,
            duration_ms,
        }
    }

    pub fn deadline(&self) -> Timestamp {
        self.started_at.saturating_add_ms(self.duration_ms)
    }

    pub fn remaining_ms(&self, now: Timestamp) -> u64 {
        self.deadline().0.saturating_sub(now.0)
    }

    pub fn is_expired(&self, now: Timestamp) -> bool {
        now >= self.deadline()
    }
}

/// Errors raised while seeding a battle from pre-battle selections.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum SetupError {
    #[error("{side} selected {count} creatures (max {max})", max = GameConfig::MAX_SELECTED_CREATURES)]
    TooManyCreatures { side: SideId, count: usize },

    #[error("{side} selected {count} tools (max {max})", max = GameConfig::MAX_SELECTED_TOOLS)]
    TooManyTools { side: SideId, count: usize },

    #[error("{side} selected {count} spells (max {max})", max = GameConfig::MAX_SELECTED_SPELLS)]
    TooManySpells { side: SideId, count: usize },

    #[error("creature {0} appears more than once")]
    DuplicateCreature(CreatureId),
}

impl GameError for SetupError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            SetupError::TooManyCreatures { .. } => "SETUP_TOO_MANY_CREATURES",
            SetupError::TooManyTools { .. } => "SETUP_TOO_MANY_TOOLS",
            SetupError::TooManySpells { .. } => "SETUP_TOO_MANY_SPELLS",
            SetupError::DuplicateCreature(_) => "SETUP_DUPLICATE_CREATURE",
        }
    }
}

/// Canonical snapshot of one battle.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct BattleState {
    pub config: GameConfig,
    pub difficulty: Difficulty,
    sides: [BattleSide; 2],
    /// Starts at 1, increments whenever control returns to side A.
    pub turn: u32,
    pub active: SideId,
    pub phase: Phase,
    pub log: BattleLog,
    pub window: TurnWindow,
    pub result: Option<BattleResult>,
    /// Incremented on every committed mutation.
    pub version: u64,
}

impl BattleState {
    /// Seeds both sides from their pre-battle selections.
    ///
    /// Prefer [`crate::engine::BattleEngine::start`], which also settles a
    /// battle where one side brought nothing.
    pub fn new(
        config: GameConfig,
        difficulty: Difficulty,
        side_a: SideSetup,
        side_b: SideSetup,
        now: Timestamp,
    ) -> Result<Self, SetupError> {
        validate_setup(SideId::A, &side_a)?;
        validate_setup(SideId::B, &side_b)?;

        let mut seen = HashSet::new();
        for creature in side_a.creatures.iter().chain(side_b.creatures.iter()) {
            if !seen.insert(creature.id) {
                return Err(SetupError::DuplicateCreature(creature.id));
            }
        }

        let energy = config.starting_energy.min(config.energy_cap);
        let sides = [
            BattleSide::new(
                SideId::A,
                side_a,
                difficulty.field_capacity(SideId::A),
                energy,
            ),
            BattleSide::new(
                SideId::B,
                side_b,
                difficulty.field_capacity(SideId::B),
                energy,
            ),
        ];
        let window = TurnWindow::new(now, config.turn_duration_ms);

        let mut log = BattleLog::new();
        log.push(1, format!("Battle started ({difficulty}). side A moves first."));

        Ok(Self {
            config,
            difficulty,
            sides,
            turn: 1,
            active: SideId::A,
            phase: Phase::Active,
            log,
            window,
            result: None,
            version: 0,
        })
    }

    pub fn side(&self, id: SideId) -> &BattleSide {
        &self.sides[id.index()]
    }

    pub fn side_mut(&mut self, id: SideId) -> &mut BattleSide {
        &mut self.sides[id.index()]
    }

    /// Mutable access to `id` and its opponent at the same time.
    pub fn side_and_opponent_mut(&mut self, id: SideId) -> (&mut BattleSide, &mut BattleSide) {
        let [a, b] = &mut self.sides;
        match id {
            SideId::A => (a, b),
            SideId::B => (b, a),
        }
    }

    pub fn is_completed(&self) -> bool {
        self.phase == Phase::Completed
    }

    pub fn time_remaining_ms(&self, now: Timestamp) -> u64 {
        if self.is_completed() {
            0
        } else {
            self.window.remaining_ms(now)
        }
    }

    /// Appends a log entry stamped with the current turn.
    pub fn record(&mut self, message: impl Into<String>) {
        self.log.push(self.turn, message);
    }
}

fn validate_setup(side: SideId, setup: &SideSetup) -> Result<(), SetupError> {
    if setup.creatures.len() > GameConfig::MAX_SELECTED_CREATURES {
        return Err(SetupError::TooManyCreatures {
            side,
            count: setup.creatures.len(),
        });
    }
    if setup.tools.len() > GameConfig::MAX_SELECTED_TOOLS {
        return Err(SetupError::TooManyTools {
            side,
            count: setup.tools.len(),
        });
    }
    if setup.spells.len() > GameConfig::MAX_SELECTED_SPELLS {
        return Err(SetupError::TooManySpells {
            side,
            count: setup.spells.len(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::creature::fixtures::{creature, stats};
    use super::*;

    #[test]
    fn player_field_is_three_and_opponent_follows_difficulty() {
        let state = BattleState::new(
            GameConfig::default(),
            Difficulty::Hard,
            SideSetup::new(vec![creature(1, "Emberling", stats(30, 10, 5))]),
            SideSetup::new(vec![creature(2, "Mossback", stats(30, 10, 5))]),
            Timestamp(0),
        )
        .unwrap();

        assert_eq!(state.side(SideId::A).field_capacity, 3);
        assert_eq!(state.side(SideId::B).field_capacity, 5);
        assert_eq!(state.side(SideId::B).hand[0].owner, SideId::B);
        assert_eq!(state.turn, 1);
        assert_eq!(state.active, SideId::A);
    }

    #[test]
    fn duplicate_creature_ids_are_rejected() {
        let result = BattleState::new(
            GameConfig::default(),
            Difficulty::Easy,
            SideSetup::new(vec![creature(1, "Emberling", stats(30, 10, 5))]),
            SideSetup::new(vec![creature(1, "Mossback", stats(30, 10, 5))]),
            Timestamp(0),
        );

        assert_eq!(result, Err(SetupError::DuplicateCreature(CreatureId(1))));
    }

    #[test]
    fn oversized_selection_is_rejected() {
        let creatures = (1..=6)
            .map(|i| creature(i, "Emberling", stats(30, 10, 5)))
            .collect();
        let result = BattleState::new(
            GameConfig::default(),
            Difficulty::Easy,
            SideSetup::new(creatures),
            SideSetup::default(),
            Timestamp(0),
        );

        assert!(matches!(
            result,
            Err(SetupError::TooManyCreatures { side: SideId::A, count: 6 })
        ));
    }

    #[test]
    fn turn_window_counts_down_and_expires() {
        let window = TurnWindow::new(Timestamp(1_000), 500);
        assert_eq!(window.remaining_ms(Timestamp(1_200)), 300);
        assert!(!window.is_expired(Timestamp(1_499)));
        assert!(window.is_expired(Timestamp(1_500)));
        assert_eq!(window.remaining_ms(Timestamp(9_000)), 0);
    }
}
