//! Asynchronous abstraction for sourcing player intent.
//!
//! Runtime users plug in [`ActionProvider`] implementations so a battle can
//! be driven by human input, scripted fixtures, or AI policies.
use arena_core::{ActionKind, ActionRequest, ProjectedState};
use async_trait::async_trait;

use super::errors::Result;

/// Trait for choosing the next request from what a player can see.
///
/// Providers only ever receive the viewer's projection, so an AI policy has
/// exactly the information a human in the same seat would have.
#[async_trait]
pub trait ActionProvider: Send + Sync {
    /// Provide the next request for the side that `view` was projected for.
    ///
    /// Only called while `view.is_your_turn` holds.
    async fn provide_action(&self, view: &ProjectedState) -> Result<ActionRequest>;
}

/// A provider that always ends the turn.
/// Useful for testing or as a fallback.
pub struct EndTurnProvider;

#[async_trait]
impl ActionProvider for EndTurnProvider {
    async fn provide_action(&self, _view: &ProjectedState) -> Result<ActionRequest> {
        Ok(ActionRequest::new(ActionKind::EndTurn))
    }
}
