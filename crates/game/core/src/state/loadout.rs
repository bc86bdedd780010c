//! Tools and spells a side brings into battle.

use std::fmt;

/// Identifier of a tool within one side's loadout.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct ToolId(pub u32);

impl fmt::Display for ToolId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "tool#{}", self.0)
    }
}

/// Identifier of a spell within one side's loadout.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct SpellId(pub u32);

impl fmt::Display for SpellId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "spell#{}", self.0)
    }
}

/// What a tool does to its (friendly) target.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ToolEffect {
    /// Restore health.
    Heal(u32),
    /// Raise both attack stats by a percentage for the rest of the battle.
    Buff(u32),
    /// Remove every status effect.
    Cleanse,
}

/// A single-use item.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct Tool {
    pub id: ToolId,
    pub name: String,
    pub effect: ToolEffect,
    pub consumed: bool,
}

impl Tool {
    pub fn new(id: ToolId, name: impl Into<String>, effect: ToolEffect) -> Self {
        Self {
            id,
            name: name.into(),
            effect,
            consumed: false,
        }
    }
}

/// Who a spell lands on.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SpellTarget {
    #[default]
    Single,
    AllEnemies,
}

/// What a spell does.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SpellEffect {
    /// Magical damage: power + caster magical attack − target magical defense.
    Damage { power: u32, target: SpellTarget },
    /// Restore health to a friendly creature.
    Heal(u32),
    /// Stun an enemy creature for the given number of its own turns.
    Stun(u32),
}

impl SpellEffect {
    /// Whether the spell is aimed at the opposing field.
    pub const fn is_offensive(&self) -> bool {
        matches!(self, SpellEffect::Damage { .. } | SpellEffect::Stun(_))
    }
}

/// A reusable spell; each cast costs energy.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct Spell {
    pub id: SpellId,
    pub name: String,
    pub effect: SpellEffect,
}

impl Spell {
    pub fn new(id: SpellId, name: impl Into<String>, effect: SpellEffect) -> Self {
        Self {
            id,
            name: name.into(),
            effect,
        }
    }
}
