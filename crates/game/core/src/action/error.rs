//! Typed reasons an action is illegal.

use crate::error::{ErrorSeverity, GameError};
use crate::state::{CannotAct, CreatureId, SpellId, ToolId};

/// Why the resolver refused an action. Nothing is mutated when this is returned.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ActionError {
    #[error("creature {0} is not in hand")]
    NotInHand(CreatureId),

    #[error("creature {0} is already deployed")]
    AlreadyDeployed(CreatureId),

    #[error("creature {0} is not on your field")]
    NotOnField(CreatureId),

    #[error("target {0} is not on the opposing field")]
    TargetNotFound(CreatureId),

    #[error("friendly target {0} is not on your field")]
    AllyNotFound(CreatureId),

    #[error("this action needs a target")]
    MissingTarget,

    #[error("field is full ({capacity} slots)")]
    FieldFull { capacity: usize },

    #[error("not enough energy: need {required}, have {available}")]
    InsufficientEnergy { required: u32, available: u32 },

    #[error("creature {creature} cannot act: {reason}")]
    CannotAct { creature: CreatureId, reason: CannotAct },

    #[error("creature {0} is already defending")]
    AlreadyDefending(CreatureId),

    #[error("{0} is not in your loadout")]
    ToolNotFound(ToolId),

    #[error("{0} has already been used")]
    ToolConsumed(ToolId),

    #[error("{0} is not in your loadout")]
    SpellNotFound(SpellId),

    #[error("{0} is resolved by the turn engine")]
    NotResolvable(crate::action::ActionKind),
}

impl GameError for ActionError {
    fn severity(&self) -> ErrorSeverity {
        use ActionError::*;
        match self {
            NotInHand(_) | NotOnField(_) | TargetNotFound(_) | AllyNotFound(_) => {
                ErrorSeverity::Validation
            }
            ToolNotFound(_) | SpellNotFound(_) | MissingTarget => ErrorSeverity::Validation,
            AlreadyDeployed(_) | FieldFull { .. } | InsufficientEnergy { .. } => {
                ErrorSeverity::Recoverable
            }
            CannotAct { .. } | AlreadyDefending(_) | ToolConsumed(_) => ErrorSeverity::Recoverable,
            NotResolvable(_) => ErrorSeverity::Internal,
        }
    }

    fn error_code(&self) -> &'static str {
        use ActionError::*;
        match self {
            NotInHand(_) => "ACTION_NOT_IN_HAND",
            AlreadyDeployed(_) => "ACTION_ALREADY_DEPLOYED",
            NotOnField(_) => "ACTION_NOT_ON_FIELD",
            TargetNotFound(_) => "ACTION_TARGET_NOT_FOUND",
            AllyNotFound(_) => "ACTION_ALLY_NOT_FOUND",
            MissingTarget => "ACTION_MISSING_TARGET",
            FieldFull { .. } => "ACTION_FIELD_FULL",
            InsufficientEnergy { .. } => "ACTION_INSUFFICIENT_ENERGY",
            CannotAct { .. } => "ACTION_CANNOT_ACT",
            AlreadyDefending(_) => "ACTION_ALREADY_DEFENDING",
            ToolNotFound(_) => "ACTION_TOOL_NOT_FOUND",
            ToolConsumed(_) => "ACTION_TOOL_CONSUMED",
            SpellNotFound(_) => "ACTION_SPELL_NOT_FOUND",
            NotResolvable(_) => "ACTION_NOT_RESOLVABLE",
        }
    }
}
