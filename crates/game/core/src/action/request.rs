//! Wire-level action request.
//!
//! Clients submit `{type, creatureId, targetId?, toolId?, spellId?, style?}`.
//! Which optional fields are required depends on `type`:
//!
//! | type       | creatureId | targetId           | toolId | spellId |
//! |------------|------------|--------------------|--------|---------|
//! | `deploy`   | creature   |                    |        |         |
//! | `attack`   | attacker   | enemy              |        |         |
//! | `useTool`  | ally       |                    | tool   |         |
//! | `useSpell` | caster     | per spell effect   |        | spell   |
//! | `defend`   | creature   |                    |        |         |
//! | `endTurn`  |            |                    |        |         |
//! | `forfeit`  |            |                    |        |         |

use crate::error::{ErrorSeverity, GameError};
use crate::state::{CreatureId, SpellId, ToolId};

use super::{Action, ActionKind, AttackStyle};

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct ActionRequest {
    #[cfg_attr(feature = "serde", serde(rename = "type"))]
    pub kind: ActionKind,
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub creature_id: Option<CreatureId>,
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub target_id: Option<CreatureId>,
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub tool_id: Option<ToolId>,
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub spell_id: Option<SpellId>,
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub style: Option<AttackStyle>,
}

impl ActionRequest {
    pub fn new(kind: ActionKind) -> Self {
        Self {
            kind,
            creature_id: None,
            target_id: None,
            tool_id: None,
            spell_id: None,
            style: None,
        }
    }
}

/// The request is structurally incomplete for its `type`.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RequestError {
    #[error("{kind} request is missing `{field}`")]
    MissingField { kind: ActionKind, field: String },
}

impl GameError for RequestError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            RequestError::MissingField { .. } => "REQUEST_MISSING_FIELD",
        }
    }
}

fn required<T>(value: Option<T>, kind: ActionKind, field: &str) -> Result<T, RequestError> {
    value.ok_or_else(|| RequestError::MissingField {
        kind,
        field: field.to_owned(),
    })
}

impl TryFrom<ActionRequest> for Action {
    type Error = RequestError;

    fn try_from(request: ActionRequest) -> Result<Self, Self::Error> {
        let kind = request.kind;
        let creature = || required(request.creature_id, kind, "creatureId");

        Ok(match kind {
            ActionKind::Deploy => Action::Deploy {
                creature: creature()?,
            },
            ActionKind::Attack => Action::Attack {
                attacker: creature()?,
                target: required(request.target_id, kind, "targetId")?,
                style: request.style,
            },
            ActionKind::UseTool => Action::UseTool {
                tool: required(request.tool_id, kind, "toolId")?,
                target: creature()?,
            },
            ActionKind::UseSpell => Action::UseSpell {
                spell: required(request.spell_id, kind, "spellId")?,
                caster: creature()?,
                target: request.target_id,
            },
            ActionKind::Defend => Action::Defend {
                creature: creature()?,
            },
            ActionKind::EndTurn => Action::EndTurn,
            ActionKind::Forfeit => Action::Forfeit,
        })
    }
}

impl From<&Action> for ActionRequest {
    fn from(action: &Action) -> Self {
        let mut request = ActionRequest::new(action.kind());
        match *action {
            Action::Deploy { creature } | Action::Defend { creature } => {
                request.creature_id = Some(creature);
            }
            Action::Attack {
                attacker,
                target,
                style,
            } => {
                request.creature_id = Some(attacker);
                request.target_id = Some(target);
                request.style = style;
            }
            Action::UseTool { tool, target } => {
                request.creature_id = Some(target);
                request.tool_id = Some(tool);
            }
            Action::UseSpell {
                spell,
                caster,
                target,
            } => {
                request.creature_id = Some(caster);
                request.target_id = target;
                request.spell_id = Some(spell);
            }
            Action::EndTurn | Action::Forfeit => {}
        }
        request
    }
}
