use std::fmt;

use crate::stats::{BaseAttributes, BattleStats, Form, Growth, Rarity, StatsError, derive_stats};

use super::SideId;
use super::status::{CannotAct, StatusEffectKind, StatusEffects};

/// Unique identifier of a creature within one battle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct CreatureId(pub u32);

impl fmt::Display for CreatureId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A creature instance dealt into a battle.
///
/// Stats are derived once at creation and cached. Health is always kept in
/// `[0, stats.max_health]`.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct Creature {
    pub id: CreatureId,
    pub species: String,
    pub form: Form,
    pub rarity: Rarity,
    pub combination: u32,
    health: u32,
    pub stats: BattleStats,
    pub is_defending: bool,
    pub status: StatusEffects,
    pub owner: SideId,
}

impl Creature {
    /// Creates a creature at full health from already derived stats.
    pub fn new(id: CreatureId, species: impl Into<String>, growth: Growth, stats: BattleStats) -> Self {
        Self {
            id,
            species: species.into(),
            form: growth.form,
            rarity: growth.rarity,
            combination: growth.combination,
            health: stats.max_health,
            stats,
            is_defending: false,
            status: StatusEffects::empty(),
            owner: SideId::A,
        }
    }

    /// Derives stats from a catalog attribute bag and creates the creature.
    pub fn spawn(
        id: CreatureId,
        species: impl Into<String>,
        attributes: &BaseAttributes,
        growth: Growth,
    ) -> Result<Self, StatsError> {
        let stats = derive_stats(attributes, growth)?;
        Ok(Self::new(id, species, growth, stats))
    }

    /// Starts the creature wounded; the value is clamped to the maximum.
    pub fn with_health(mut self, health: u32) -> Self {
        self.health = health.min(self.stats.max_health);
        self
    }

    pub fn growth(&self) -> Growth {
        Growth::new(self.form, self.rarity, self.combination)
    }

    pub fn health(&self) -> u32 {
        self.health
    }

    pub fn is_defeated(&self) -> bool {
        self.health == 0
    }

    /// Subtracts damage, saturating at zero. Returns the damage actually taken.
    pub fn take_damage(&mut self, amount: u32) -> u32 {
        let taken = amount.min(self.health);
        self.health -= taken;
        taken
    }

    /// Restores health up to the maximum. Returns the amount actually healed.
    pub fn heal(&mut self, amount: u32) -> u32 {
        let healed = amount.min(self.stats.max_health - self.health);
        self.health += healed;
        healed
    }

    /// Raises both attack stats by a percentage for the rest of the battle.
    pub fn buff_attack(&mut self, percent: u32) {
        let scale = |value: u32| value + value * percent / 100;
        self.stats.physical_attack = scale(self.stats.physical_attack);
        self.stats.magical_attack = scale(self.stats.magical_attack);
    }

    // ------------------------------------------------------------------
    // Status effect tracker
    // ------------------------------------------------------------------

    /// True iff an action-preventing effect is active.
    pub fn is_incapacitated(&self) -> bool {
        self.status.is_incapacitated()
    }

    /// Whether this creature may take any action other than ending the turn.
    ///
    /// Defending does not prevent acting.
    pub fn can_act(&self) -> Result<(), CannotAct> {
        if self.is_defeated() {
            return Err(CannotAct::Defeated);
        }
        if let Some(effect) = self.status.iter().find(|e| e.kind.prevents_actions()) {
            return Err(CannotAct::Incapacitated(effect.kind));
        }
        Ok(())
    }

    pub fn apply_effect(&mut self, kind: StatusEffectKind, duration: u32, turn: u32) {
        self.status.apply(kind, duration, turn);
    }

    /// Turn-start decay for this creature's effects.
    pub fn decay_turn_start(&mut self) -> Vec<StatusEffectKind> {
        self.status.decay()
    }
}
