use arrayvec::ArrayVec;

use crate::config::GameConfig;

use super::SideId;
use super::creature::{Creature, CreatureId};
use super::loadout::{Spell, SpellId, Tool, ToolId};

/// Difficulty tier of the opposing side; decides its field capacity.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, strum::Display, strum::EnumString,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Difficulty {
    #[default]
    Easy,
    Medium,
    Hard,
    Expert,
}

impl Difficulty {
    pub const fn opponent_field_capacity(self) -> usize {
        match self {
            Difficulty::Easy => 3,
            Difficulty::Medium => 4,
            Difficulty::Hard => 5,
            Difficulty::Expert => 6,
        }
    }

    /// Field capacity for `side`: the player side is always 3.
    pub const fn field_capacity(self, side: SideId) -> usize {
        match side {
            SideId::A => GameConfig::PLAYER_FIELD_CAPACITY,
            SideId::B => self.opponent_field_capacity(),
        }
    }
}

/// Pre-battle selection for one side.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SideSetup {
    pub creatures: Vec<Creature>,
    pub tools: Vec<Tool>,
    pub spells: Vec<Spell>,
    pub rating: u32,
}

impl SideSetup {
    pub const DEFAULT_RATING: u32 = 1200;

    pub fn new(creatures: Vec<Creature>) -> Self {
        Self {
            creatures,
            tools: Vec::new(),
            spells: Vec::new(),
            rating: Self::DEFAULT_RATING,
        }
    }

    pub fn with_tools(mut self, tools: Vec<Tool>) -> Self {
        self.tools = tools;
        self
    }

    pub fn with_spells(mut self, spells: Vec<Spell>) -> Self {
        self.spells = spells;
        self
    }

    pub fn with_rating(mut self, rating: u32) -> Self {
        self.rating = rating;
        self
    }
}

/// One of the two competing sides.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct BattleSide {
    pub id: SideId,
    /// Creatures dealt but not yet deployed, in deal order.
    pub hand: ArrayVec<Creature, { GameConfig::MAX_HAND_SIZE }>,
    /// Deployed creatures, in deploy order.
    pub field: ArrayVec<Creature, { GameConfig::MAX_FIELD_SLOTS }>,
    pub field_capacity: usize,
    /// Undealt creatures; the front is dealt first.
    pub deck: Vec<Creature>,
    pub energy: u32,
    pub tools: Vec<Tool>,
    pub spells: Vec<Spell>,
    pub rating: u32,
}

impl BattleSide {
    /// Deals the selection into hand (up to the hand limit) and deck.
    pub fn new(id: SideId, setup: SideSetup, field_capacity: usize, energy: u32) -> Self {
        let mut side = Self {
            id,
            hand: ArrayVec::new(),
            field: ArrayVec::new(),
            field_capacity: field_capacity.min(GameConfig::MAX_FIELD_SLOTS),
            deck: setup.creatures,
            energy,
            tools: setup.tools,
            spells: setup.spells,
            rating: setup.rating,
        };
        for creature in side.deck.iter_mut() {
            creature.owner = id;
        }
        side.draw_to_limit();
        side
    }

    /// Moves creatures from deck to hand while the hand has room.
    /// Returns how many were drawn.
    pub fn draw_to_limit(&mut self) -> usize {
        let room = self.hand.remaining_capacity().min(self.deck.len());
        for creature in self.deck.drain(..room) {
            self.hand.push(creature);
        }
        room
    }

    pub fn is_field_full(&self) -> bool {
        self.field.len() >= self.field_capacity
    }

    /// A side with nothing in hand and nothing on the field has lost.
    pub fn is_exhausted(&self) -> bool {
        self.hand.is_empty() && self.field.is_empty()
    }

    pub fn hand_creature(&self, id: CreatureId) -> Option<&Creature> {
        self.hand.iter().find(|c| c.id == id)
    }

    pub fn field_creature(&self, id: CreatureId) -> Option<&Creature> {
        self.field.iter().find(|c| c.id == id)
    }

    pub fn field_creature_mut(&mut self, id: CreatureId) -> Option<&mut Creature> {
        self.field.iter_mut().find(|c| c.id == id)
    }

    pub fn tool(&self, id: ToolId) -> Option<&Tool> {
        self.tools.iter().find(|t| t.id == id)
    }

    pub fn tool_mut(&mut self, id: ToolId) -> Option<&mut Tool> {
        self.tools.iter_mut().find(|t| t.id == id)
    }

    pub fn spell(&self, id: SpellId) -> Option<&Spell> {
        self.spells.iter().find(|s| s.id == id)
    }

    /// Removes defeated creatures from the field. Returns their ids in field order.
    pub fn remove_defeated(&mut self) -> Vec<CreatureId> {
        let defeated: Vec<CreatureId> = self
            .field
            .iter()
            .filter(|c| c.is_defeated())
            .map(|c| c.id)
            .collect();
        self.field.retain(|c| !c.is_defeated());
        defeated
    }

    pub fn regenerate_energy(&mut self, amount: u32, cap: u32) -> u32 {
        let before = self.energy;
        self.energy = self.energy.saturating_add(amount).min(cap).max(before);
        self.energy - before
    }

    /// Deducts energy. Callers validate affordability first.
    pub(crate) fn spend_energy(&mut self, amount: u32) {
        debug_assert!(amount <= self.energy, "energy spent without validation");
        self.energy = self.energy.saturating_sub(amount);
    }
}
