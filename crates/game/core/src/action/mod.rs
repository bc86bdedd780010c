//! Action domain.
//!
//! - `request`: the camelCase wire request and its conversion into [`Action`]
//! - `validation`: legality and cost checks; never mutates
//! - `combat`: damage arithmetic
//! - `resolve`: applies a validated action and records one log entry
//! - `available`: enumerates the legal actions of a side
//!
//! Ending the turn and forfeiting are sequenced by [`crate::engine`]; the
//! resolver only handles actions that stay within the active turn.

pub mod available;
pub mod combat;
pub mod error;
pub mod request;
pub mod resolve;
pub mod validation;

pub use available::{ActionMask, available_actions, legal_kinds};
pub use combat::{AttackStyle, calculate_damage};
pub use error::ActionError;
pub use request::{ActionRequest, RequestError};
pub use resolve::{ActionOutcome, Impact, resolve};
pub use validation::validate;

use crate::state::{CreatureId, SpellId, ToolId};

/// Discriminant of [`Action`], also the `type` tag of a wire request.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumString, strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
#[strum(serialize_all = "camelCase")]
pub enum ActionKind {
    Deploy,
    Attack,
    UseTool,
    UseSpell,
    Defend,
    EndTurn,
    Forfeit,
}

/// A move a side may take during a battle.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Action {
    /// Move a creature from hand to field.
    Deploy { creature: CreatureId },

    /// Strike an enemy field creature. `style: None` picks the attacker's
    /// stronger offense.
    Attack {
        attacker: CreatureId,
        target: CreatureId,
        style: Option<AttackStyle>,
    },

    /// Consume a tool on a friendly field creature.
    UseTool { tool: ToolId, target: CreatureId },

    /// Cast a spell. `target` is omitted for spells that hit every enemy.
    UseSpell {
        spell: SpellId,
        caster: CreatureId,
        target: Option<CreatureId>,
    },

    /// Halve incoming damage on this creature until its side's next turn.
    Defend { creature: CreatureId },

    EndTurn,

    /// Concede the battle. Accepted from either side while the battle is active.
    Forfeit,
}

impl Action {
    pub const fn kind(&self) -> ActionKind {
        match self {
            Action::Deploy { .. } => ActionKind::Deploy,
            Action::Attack { .. } => ActionKind::Attack,
            Action::UseTool { .. } => ActionKind::UseTool,
            Action::UseSpell { .. } => ActionKind::UseSpell,
            Action::Defend { .. } => ActionKind::Defend,
            Action::EndTurn => ActionKind::EndTurn,
            Action::Forfeit => ActionKind::Forfeit,
        }
    }

    /// The creature performing the action, if any.
    pub const fn actor(&self) -> Option<CreatureId> {
        match self {
            Action::Deploy { creature } | Action::Defend { creature } => Some(*creature),
            Action::Attack { attacker, .. } => Some(*attacker),
            Action::UseSpell { caster, .. } => Some(*caster),
            Action::UseTool { .. } | Action::EndTurn | Action::Forfeit => None,
        }
    }

    /// Whether the engine handles this action as a turn/phase transition.
    pub const fn is_transition(&self) -> bool {
        matches!(self, Action::EndTurn | Action::Forfeit)
    }
}
