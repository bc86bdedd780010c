//! Event types for different topics.

use arena_core::{ActionKind, BattleResult, Difficulty, LogEntry, SideId};
use serde::{Deserialize, Serialize};

use crate::server::BattleId;

/// Events about a battle's lifecycle and the requests made against it
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum BattleEvent {
    /// A battle was seeded and is open for requests
    Created {
        battle: BattleId,
        difficulty: Difficulty,
    },

    /// A request was committed
    ActionApplied {
        battle: BattleId,
        side: SideId,
        kind: ActionKind,
        /// State version after the commit
        version: u64,
        /// Battle log lines written by this commit
        entries: Vec<LogEntry>,
    },

    /// A request was refused; state is unchanged
    ActionRejected {
        battle: BattleId,
        side: SideId,
        code: String,
    },
}

/// Control passed to `side` (lightweight)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TurnEvent {
    pub battle: BattleId,
    /// Side that is now to move
    pub side: SideId,
    pub turn: u32,
    /// Whether the previous turn ended because its window ran out
    pub expired: bool,
}

/// A battle reached its result
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutcomeEvent {
    pub battle: BattleId,
    pub result: BattleResult,
}
