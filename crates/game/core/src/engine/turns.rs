use crate::state::{CreatureId, SideId, Timestamp, TurnWindow};

use super::BattleEngine;

/// What happened when control passed to the next side.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct TurnStart {
    pub side: SideId,
    pub turn: u32,
    pub energy_gained: u32,
    pub drawn: usize,
    /// Creatures whose last status effect wore off at this turn start.
    pub recovered: Vec<CreatureId>,
}

/// Turn hand-off methods for BattleEngine.
impl BattleEngine<'_> {
    /// Passes control to the opponent of the active side.
    ///
    /// The turn counter advances when control returns to side A. The newly
    /// active side regenerates energy, decays its field's status effects,
    /// drops its defend stances and draws up to the hand limit.
    pub(super) fn pass_turn(&mut self, now: Timestamp) -> TurnStart {
        let next = self.state.active.opponent();
        if next == SideId::A {
            self.state.turn += 1;
        }
        self.state.active = next;
        self.state.window = TurnWindow::new(now, self.state.config.turn_duration_ms);

        let (regen, cap) = (self.state.config.energy_regen, self.state.config.energy_cap);
        let side = self.state.side_mut(next);
        let energy_gained = side.regenerate_energy(regen, cap);

        let mut recovered = Vec::new();
        for creature in side.field.iter_mut() {
            creature.is_defending = false;
            let had_effects = !creature.status.is_empty();
            creature.decay_turn_start();
            if had_effects && creature.status.is_empty() {
                recovered.push(creature.id);
            }
        }
        let drawn = side.draw_to_limit();

        TurnStart {
            side: next,
            turn: self.state.turn,
            energy_gained,
            drawn,
            recovered,
        }
    }
}
