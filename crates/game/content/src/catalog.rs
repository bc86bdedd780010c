//! Creature, tool and spell catalog.

use arena_core::error::{ErrorSeverity, GameError};
use arena_core::{
    BaseAttributes, Creature, CreatureId, Form, Growth, Rarity, SideSetup, Spell, SpellEffect,
    SpellId, StatsError, Tool, ToolEffect, ToolId,
};

/// Catalog entry for one species.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CreatureEntry {
    pub species: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub rarity: Rarity,
    /// Form the species is dealt at unless a pick overrides it.
    #[cfg_attr(feature = "serde", serde(default = "default_form"))]
    pub form: u8,
    pub attributes: BaseAttributes,
}

#[cfg(feature = "serde")]
fn default_form() -> u8 {
    1
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ToolEntry {
    pub name: String,
    pub effect: ToolEffect,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SpellEntry {
    pub name: String,
    pub effect: SpellEffect,
}

/// One creature in a pre-battle selection.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CreaturePick {
    pub species: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub form: Option<u8>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub combination: u32,
}

impl CreaturePick {
    pub fn new(species: impl Into<String>) -> Self {
        Self {
            species: species.into(),
            form: None,
            combination: 0,
        }
    }
}

/// A player's pre-battle selection, by catalog name.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Selection {
    pub creatures: Vec<CreaturePick>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub tools: Vec<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub spells: Vec<String>,
    #[cfg_attr(feature = "serde", serde(default = "default_rating"))]
    pub rating: u32,
}

#[cfg(feature = "serde")]
fn default_rating() -> u32 {
    SideSetup::DEFAULT_RATING
}

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("no catalog entry for species `{0}`")]
    UnknownCreature(String),

    #[error("no catalog entry for tool `{0}`")]
    UnknownTool(String),

    #[error("no catalog entry for spell `{0}`")]
    UnknownSpell(String),

    #[error("catalog entry `{species}` is invalid: {source}")]
    InvalidCreature {
        species: String,
        #[source]
        source: StatsError,
    },
}

impl GameError for CatalogError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            CatalogError::InvalidCreature { source, .. } => source.severity(),
            _ => ErrorSeverity::Fatal,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            CatalogError::UnknownCreature(_) => "CATALOG_UNKNOWN_CREATURE",
            CatalogError::UnknownTool(_) => "CATALOG_UNKNOWN_TOOL",
            CatalogError::UnknownSpell(_) => "CATALOG_UNKNOWN_SPELL",
            CatalogError::InvalidCreature { source, .. } => source.error_code(),
        }
    }
}

/// Everything a battle can be built from.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Catalog {
    #[cfg_attr(feature = "serde", serde(default))]
    pub creatures: Vec<CreatureEntry>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub tools: Vec<ToolEntry>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub spells: Vec<SpellEntry>,
}

impl Catalog {
    pub fn creature(&self, species: &str) -> Option<&CreatureEntry> {
        self.creatures.iter().find(|c| c.species == species)
    }

    pub fn tool(&self, name: &str) -> Option<&ToolEntry> {
        self.tools.iter().find(|t| t.name == name)
    }

    pub fn spell(&self, name: &str) -> Option<&SpellEntry> {
        self.spells.iter().find(|s| s.name == name)
    }

    /// Derives stats for `pick` and returns a full-health battle creature.
    pub fn instantiate_creature(
        &self,
        id: CreatureId,
        pick: &CreaturePick,
    ) -> Result<Creature, CatalogError> {
        let entry = self
            .creature(&pick.species)
            .ok_or_else(|| CatalogError::UnknownCreature(pick.species.clone()))?;
        let growth = Growth::new(
            Form(pick.form.unwrap_or(entry.form)),
            entry.rarity,
            pick.combination,
        );
        Creature::spawn(id, entry.species.clone(), &entry.attributes, growth).map_err(|source| {
            CatalogError::InvalidCreature {
                species: entry.species.clone(),
                source,
            }
        })
    }

    pub fn instantiate_tool(&self, id: ToolId, name: &str) -> Result<Tool, CatalogError> {
        let entry = self
            .tool(name)
            .ok_or_else(|| CatalogError::UnknownTool(name.to_owned()))?;
        Ok(Tool::new(id, entry.name.clone(), entry.effect))
    }

    pub fn instantiate_spell(&self, id: SpellId, name: &str) -> Result<Spell, CatalogError> {
        let entry = self
            .spell(name)
            .ok_or_else(|| CatalogError::UnknownSpell(name.to_owned()))?;
        Ok(Spell::new(id, entry.name.clone(), entry.effect))
    }

    /// Builds one side's battle setup.
    ///
    /// Creature ids are assigned sequentially from `first_id`, so the two
    /// sides of a battle must use disjoint ranges. Selection limits are
    /// enforced later by the engine.
    pub fn build_side(&self, selection: &Selection, first_id: u32) -> Result<SideSetup, CatalogError> {
        let creatures = selection
            .creatures
            .iter()
            .zip(first_id..)
            .map(|(pick, id)| self.instantiate_creature(CreatureId(id), pick))
            .collect::<Result<Vec<_>, _>>()?;
        let tools = selection
            .tools
            .iter()
            .zip(1..)
            .map(|(name, id)| self.instantiate_tool(ToolId(id), name))
            .collect::<Result<Vec<_>, _>>()?;
        let spells = selection
            .spells
            .iter()
            .zip(1..)
            .map(|(name, id)| self.instantiate_spell(SpellId(id), name))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(SideSetup::new(creatures)
            .with_tools(tools)
            .with_spells(spells)
            .with_rating(selection.rating))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> Catalog {
        Catalog {
            creatures: vec![CreatureEntry {
                species: "Emberling".into(),
                rarity: Rarity::Rare,
                form: 1,
                attributes: BaseAttributes::new(10, 6, 8, 12),
            }],
            tools: vec![ToolEntry {
                name: "Salve".into(),
                effect: ToolEffect::Heal(15),
            }],
            spells: vec![SpellEntry {
                name: "Daze".into(),
                effect: SpellEffect::Stun(1),
            }],
        }
    }

    #[test]
    fn instantiates_with_derived_stats() {
        let creature = catalog()
            .instantiate_creature(CreatureId(7), &CreaturePick::new("Emberling"))
            .unwrap();

        assert_eq!(creature.id, CreatureId(7));
        assert_eq!(creature.rarity, Rarity::Rare);
        assert_eq!(creature.stats.max_health, 115);
        assert_eq!(creature.health(), 115);
        assert_eq!(creature.stats.energy_cost, 5);
    }

    #[test]
    fn unknown_species_is_fatal() {
        let error = catalog()
            .instantiate_creature(CreatureId(1), &CreaturePick::new("Gloomwing"))
            .unwrap_err();

        assert!(matches!(error, CatalogError::UnknownCreature(ref s) if s == "Gloomwing"));
        assert!(error.severity().is_fatal());
    }

    #[test]
    fn incomplete_entry_surfaces_stats_error() {
        let mut catalog = catalog();
        catalog.creatures[0].attributes.stamina = None;

        let error = catalog
            .instantiate_creature(CreatureId(1), &CreaturePick::new("Emberling"))
            .unwrap_err();

        assert_eq!(error.error_code(), "STATS_INVALID_CREATURE_DATA");
    }

    #[test]
    fn builds_side_with_sequential_ids() {
        let selection = Selection {
            creatures: vec![CreaturePick::new("Emberling"), CreaturePick::new("Emberling")],
            tools: vec!["Salve".into()],
            spells: vec!["Daze".into()],
            rating: 1300,
        };

        let setup = catalog().build_side(&selection, 100).unwrap();

        let ids: Vec<_> = setup.creatures.iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![CreatureId(100), CreatureId(101)]);
        assert_eq!(setup.tools[0].id, ToolId(1));
        assert_eq!(setup.spells[0].id, SpellId(1));
        assert_eq!(setup.rating, 1300);
    }
}
