//! Polling player loop.
//!
//! A [`PollingClient`] plays one seat of one battle: it fetches its
//! projection, asks its provider for a request while it is its turn, and
//! otherwise sleeps for the poll interval. It returns the final projection
//! once the battle is completed.

use std::time::Duration;

use arena_core::{ActionKind, ActionRequest, Phase, ProjectedState, SideId};
use tracing::{debug, info, warn};

use crate::api::{ActionProvider, RejectionKind, Result};
use crate::server::{BattleId, BattleServer};

pub struct PollingClient<P> {
    server: BattleServer,
    battle: BattleId,
    side: SideId,
    provider: P,
    poll_interval: Duration,
}

impl<P: ActionProvider> PollingClient<P> {
    pub fn new(server: BattleServer, battle: BattleId, side: SideId, provider: P) -> Self {
        let poll_interval = server.config().poll_interval;
        Self {
            server,
            battle,
            side,
            provider,
            poll_interval,
        }
    }

    pub fn with_poll_interval(mut self, poll_interval: Duration) -> Self {
        self.poll_interval = poll_interval;
        self
    }

    /// Plays until the battle is completed and returns the final projection.
    pub async fn run(&self) -> Result<ProjectedState> {
        let mut seen_version = None;

        loop {
            let view = self.server.get_state(self.battle, self.side).await?;

            if view.status == Phase::Completed {
                let won = view
                    .result
                    .as_ref()
                    .map(|result| result.winner_side == self.side);
                info!(
                    target: "arena::client",
                    battle = %self.battle,
                    side = ?self.side,
                    won = ?won,
                    turn = view.turn,
                    "battle over"
                );
                return Ok(view);
            }

            if view.is_your_turn {
                self.act(&view).await?;
                continue;
            }

            if seen_version != Some(view.version) {
                debug!(
                    target: "arena::client",
                    battle = %self.battle,
                    side = ?self.side,
                    version = view.version,
                    "waiting for opponent"
                );
                seen_version = Some(view.version);
            }
            tokio::time::sleep(self.poll_interval).await;
        }
    }

    /// Submits one provider choice, ending the turn instead if it is refused.
    async fn act(&self, view: &ProjectedState) -> Result<()> {
        let request = self.provider.provide_action(view).await?;
        let kind = request.kind;

        let Err(rejection) = self
            .server
            .submit_action(self.battle, self.side, request)
            .await
        else {
            return Ok(());
        };

        match rejection.kind {
            // The state moved on since `view`; the next poll catches up.
            RejectionKind::NotYourTurn | RejectionKind::BattleCompleted => {
                tokio::time::sleep(self.poll_interval).await;
                Ok(())
            }
            RejectionKind::UnknownBattle => Err(rejection.into()),
            RejectionKind::Malformed | RejectionKind::Illegal => {
                warn!(
                    target: "arena::client",
                    battle = %self.battle,
                    side = ?self.side,
                    %kind,
                    code = %rejection.code,
                    "provider choice refused; ending turn"
                );
                if kind == ActionKind::EndTurn {
                    return Err(rejection.into());
                }
                match self
                    .server
                    .submit_action(self.battle, self.side, ActionRequest::new(ActionKind::EndTurn))
                    .await
                {
                    Ok(_) => Ok(()),
                    Err(fallback) if fallback.kind == RejectionKind::UnknownBattle => {
                        Err(fallback.into())
                    }
                    Err(_) => Ok(()),
                }
            }
        }
    }
}
