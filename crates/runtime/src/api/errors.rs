//! Unified error types surfaced by the runtime API.
//!
//! [`RuntimeError`] covers hosting and worker failures. [`Rejection`] is the
//! serialisable answer a player gets when a request is refused. The request
//! itself never changes battle state, though an overdue turn may still have
//! been ended on the way.
use arena_core::{ActionError, ExecuteError, GameError, RequestError, SetupError};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::server::BattleId;

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error(transparent)]
    Setup(#[from] SetupError),

    /// Another writer committed between snapshot and commit. Retried by the
    /// server and never returned from its public methods.
    #[error("{battle} moved from version {expected} to {found} during commit")]
    StateConflict {
        battle: BattleId,
        expected: u64,
        found: u64,
    },

    #[error(transparent)]
    Rejected(#[from] Rejection),

    #[error("turn timer worker join failed")]
    WorkerJoin(#[source] tokio::task::JoinError),
}

/// Broad class of a refused request.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RejectionKind {
    UnknownBattle,
    NotYourTurn,
    BattleCompleted,
    /// The request is structurally incomplete for its type.
    Malformed,
    /// Well-formed but not legal in the current state; see `reason`.
    Illegal,
}

/// A refused request, ready to be shown to the player.
#[derive(Clone, Debug, PartialEq, Eq, Error, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[error("{message}")]
pub struct Rejection {
    pub kind: RejectionKind,
    /// Stable identifier from the underlying error.
    pub code: String,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<ActionError>,
}

impl Rejection {
    fn from_error(kind: RejectionKind, error: &impl GameError) -> Self {
        Self {
            kind,
            code: error.error_code().to_owned(),
            message: error.to_string(),
            reason: None,
        }
    }

    pub fn unknown_battle(battle: BattleId) -> Self {
        Self {
            kind: RejectionKind::UnknownBattle,
            code: "RUNTIME_UNKNOWN_BATTLE".to_owned(),
            message: format!("{battle} does not exist"),
            reason: None,
        }
    }
}

impl From<ExecuteError> for Rejection {
    fn from(error: ExecuteError) -> Self {
        match error {
            ExecuteError::NotYourTurn { .. } => {
                Self::from_error(RejectionKind::NotYourTurn, &error)
            }
            ExecuteError::BattleCompleted => {
                Self::from_error(RejectionKind::BattleCompleted, &error)
            }
            ExecuteError::Action(ref reason) => Self {
                reason: Some(reason.clone()),
                ..Self::from_error(RejectionKind::Illegal, &error)
            },
        }
    }
}

impl From<RequestError> for Rejection {
    fn from(error: RequestError) -> Self {
        Self::from_error(RejectionKind::Malformed, &error)
    }
}

#[cfg(test)]
mod tests {
    use arena_core::{CreatureId, SideId};

    use super::*;

    #[test]
    fn illegal_action_keeps_typed_reason() {
        let rejection = Rejection::from(ExecuteError::Action(ActionError::NotInHand(
            CreatureId(4),
        )));

        assert_eq!(rejection.kind, RejectionKind::Illegal);
        assert_eq!(rejection.reason, Some(ActionError::NotInHand(CreatureId(4))));
        assert_eq!(rejection.message, "illegal action: creature #4 is not in hand");
    }

    #[test]
    fn turn_errors_map_to_their_kinds() {
        let not_yours = Rejection::from(ExecuteError::NotYourTurn { active: SideId::B });
        assert_eq!(not_yours.kind, RejectionKind::NotYourTurn);
        assert_eq!(not_yours.code, "ENGINE_NOT_YOUR_TURN");
        assert!(not_yours.reason.is_none());

        let done = Rejection::from(ExecuteError::BattleCompleted);
        assert_eq!(done.kind, RejectionKind::BattleCompleted);
    }
}
