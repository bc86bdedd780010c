//! Deterministic creature-battle rules shared by the server and clients.
//!
//! `arena-core` defines the canonical rules (stat derivation, synergies,
//! status effects, actions, turn sequencing) and exposes pure APIs with no
//! I/O or clock access; callers pass the current [`state::Timestamp`]. All
//! state mutation flows through [`engine::BattleEngine`], and players observe
//! battles through [`view::project`].
pub mod action;
pub mod config;
pub mod engine;
pub mod error;
pub mod state;
pub mod stats;
pub mod synergy;
pub mod view;

pub use action::{
    Action, ActionError, ActionKind, ActionMask, ActionOutcome, ActionRequest, AttackStyle,
    Impact, RequestError, available_actions,
};
pub use config::GameConfig;
pub use engine::{BattleEngine, BattleResult, EndReason, ExecuteError, ExecutionOutcome, TurnStart};
pub use error::{ErrorSeverity, GameError};
pub use state::{
    BattleLog, BattleSide, BattleState, CannotAct, Creature, CreatureId, Difficulty, LogEntry,
    Phase, SetupError, SideId, SideSetup, Spell, SpellEffect, SpellId, SpellTarget, StatusEffect,
    StatusEffectKind, Timestamp, Tool, ToolEffect, ToolId, TurnWindow,
};
pub use stats::{BaseAttributes, BattleStats, Form, Growth, Rarity, StatsError, derive_stats};
pub use synergy::{SynergyKind, SynergyResult, evaluate_synergies};
pub use view::{CreatureView, HandView, ProjectedState, ResultView, SideView, project};
