//! Win detection and rating settlement.

use crate::state::{BattleState, Phase, SideId};

/// Elo K-factor applied to every settled battle.
pub const RATING_K_FACTOR: f64 = 32.0;

/// How a battle ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
#[strum(serialize_all = "lowercase")]
pub enum EndReason {
    /// The loser had nothing left in hand or on the field.
    Defeat,
    Forfeit,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct BattleResult {
    pub winner: SideId,
    pub loser: SideId,
    pub reason: EndReason,
    /// Rating points gained by the winner and lost by the loser.
    pub rating_delta: u32,
}

impl BattleResult {
    /// Rating change from `viewer`'s perspective.
    pub fn rating_change_for(&self, viewer: SideId) -> i64 {
        let delta = i64::from(self.rating_delta);
        if viewer == self.winner { delta } else { -delta }
    }
}

/// Elo gain of a winner rated `winner` over a loser rated `loser`.
pub fn rating_delta(winner: u32, loser: u32) -> u32 {
    let gap = (f64::from(loser) - f64::from(winner)) / 400.0;
    let expected = 1.0 / (1.0 + 10f64.powf(gap));
    (RATING_K_FACTOR * (1.0 - expected)).round() as u32
}

/// The side that has lost by exhaustion, if any.
///
/// `last_actor`'s opponent is checked first, so when both sides are empty the
/// side that did not act loses.
pub fn exhausted_side(state: &BattleState, last_actor: SideId) -> Option<SideId> {
    [last_actor.opponent(), last_actor]
        .into_iter()
        .find(|&side| state.side(side).is_exhausted())
}

/// Completes the battle in favour of `winner` and settles ratings.
pub(crate) fn finish(state: &mut BattleState, winner: SideId, reason: EndReason) -> BattleResult {
    let loser = winner.opponent();
    let delta = rating_delta(state.side(winner).rating, state.side(loser).rating);

    let winner_side = state.side_mut(winner);
    winner_side.rating = winner_side.rating.saturating_add(delta);
    let loser_side = state.side_mut(loser);
    loser_side.rating = loser_side.rating.saturating_sub(delta);

    let result = BattleResult {
        winner,
        loser,
        reason,
        rating_delta: delta,
    };
    state.phase = Phase::Completed;
    state.result = Some(result);
    state.record(format!("{winner} wins by {reason}."));
    result
}
