//! Catalog loader.

use std::collections::HashSet;
use std::path::Path;

use crate::catalog::{Catalog, Selection};
use crate::loaders::{LoadResult, read_file};

/// Loader for the creature/tool/spell catalog from RON files.
pub struct CatalogLoader;

impl CatalogLoader {
    /// Load a catalog from a RON file.
    ///
    /// Names must be unique within each section.
    pub fn load(path: &Path) -> LoadResult<Catalog> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<Catalog> {
        let catalog: Catalog = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse catalog RON: {}", e))?;

        ensure_unique("species", catalog.creatures.iter().map(|c| c.species.as_str()))?;
        ensure_unique("tool", catalog.tools.iter().map(|t| t.name.as_str()))?;
        ensure_unique("spell", catalog.spells.iter().map(|s| s.name.as_str()))?;

        Ok(catalog)
    }

    /// Load a pre-battle selection from a RON file.
    pub fn load_selection(path: &Path) -> LoadResult<Selection> {
        let content = read_file(path)?;
        ron::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse selection RON {}: {}", path.display(), e))
    }
}

fn ensure_unique<'a>(what: &str, names: impl Iterator<Item = &'a str>) -> LoadResult<()> {
    let mut seen = HashSet::new();
    for name in names {
        if !seen.insert(name) {
            anyhow::bail!("duplicate {} `{}` in catalog", what, name);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::fs;

    use arena_core::{Rarity, SpellEffect, SpellTarget, ToolEffect};
    use tempfile::TempDir;

    use super::*;

    const CATALOG: &str = r#"#![enable(implicit_some)]
(
    creatures: [
        (
            species: "Emberling",
            rarity: Rare,
            attributes: (strength: 10, magic: 6, stamina: 8, speed: 12),
        ),
        (
            species: "Mossback",
            form: 2,
            attributes: (strength: 8, magic: 4, stamina: 14, speed: 5, energy_cost: 4),
        ),
    ],
    tools: [
        (name: "Salve", effect: Heal(15)),
        (name: "Smelling salts", effect: Cleanse),
    ],
    spells: [
        (name: "Firestorm", effect: Damage(power: 6, target: AllEnemies)),
        (name: "Daze", effect: Stun(1)),
    ],
)
"#;

    #[test]
    fn loads_catalog_from_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("catalog.ron");
        fs::write(&path, CATALOG).unwrap();

        let catalog = CatalogLoader::load(&path).unwrap();

        assert_eq!(catalog.creatures.len(), 2);
        let ember = catalog.creature("Emberling").unwrap();
        assert_eq!(ember.rarity, Rarity::Rare);
        assert_eq!(ember.form, 1);
        assert_eq!(catalog.creature("Mossback").unwrap().attributes.energy_cost, Some(4));
        assert_eq!(catalog.tool("Smelling salts").unwrap().effect, ToolEffect::Cleanse);
        assert_eq!(
            catalog.spell("Firestorm").unwrap().effect,
            SpellEffect::Damage {
                power: 6,
                target: SpellTarget::AllEnemies
            }
        );
    }

    #[test]
    fn duplicate_species_is_rejected() {
        let content = r#"#![enable(implicit_some)]
(
    creatures: [
        (species: "Emberling", attributes: (strength: 1, magic: 1, stamina: 1, speed: 1)),
        (species: "Emberling", attributes: (strength: 2, magic: 2, stamina: 2, speed: 2)),
    ],
)
"#;
        let err = CatalogLoader::parse(content).unwrap_err();
        assert!(err.to_string().contains("duplicate species"));
    }

    #[test]
    fn missing_file_reports_path() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("absent.ron");

        let err = CatalogLoader::load(&path).unwrap_err();

        assert!(err.to_string().contains("absent.ron"));
    }

    #[test]
    fn loads_selection() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("player.ron");
        fs::write(
            &path,
            r#"#![enable(implicit_some)]
(
    creatures: [(species: "Emberling"), (species: "Mossback", form: 3, combination: 2)],
    tools: ["Salve"],
)"#,
        )
        .unwrap();

        let selection = CatalogLoader::load_selection(&path).unwrap();

        assert_eq!(selection.creatures[1].form, Some(3));
        assert_eq!(selection.creatures[1].combination, 2);
        assert!(selection.spells.is_empty());
        assert_eq!(selection.rating, 1200);
    }
}
