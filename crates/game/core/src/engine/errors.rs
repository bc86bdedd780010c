//! Errors surfaced by [`super::BattleEngine::execute`].

use crate::action::ActionError;
use crate::error::{ErrorSeverity, GameError};
use crate::state::SideId;

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ExecuteError {
    #[error("not your turn: {active} is to move")]
    NotYourTurn { active: SideId },

    #[error("battle already completed")]
    BattleCompleted,

    #[error("illegal action: {0}")]
    Action(#[from] ActionError),
}

impl GameError for ExecuteError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            ExecuteError::NotYourTurn { .. } => ErrorSeverity::Recoverable,
            ExecuteError::BattleCompleted => ErrorSeverity::Validation,
            ExecuteError::Action(error) => error.severity(),
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            ExecuteError::NotYourTurn { .. } => "ENGINE_NOT_YOUR_TURN",
            ExecuteError::BattleCompleted => "ENGINE_BATTLE_COMPLETED",
            ExecuteError::Action(error) => error.error_code(),
        }
    }
}
