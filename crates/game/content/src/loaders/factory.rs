//! Content factory for loading everything a match needs from a data directory.

use std::path::{Path, PathBuf};

use arena_core::GameConfig;

use crate::catalog::{Catalog, Selection};
use crate::loaders::{CatalogLoader, ConfigLoader, LoadResult};

/// Content factory that loads all battle content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── rules.toml
/// ├── catalog.ron
/// └── selections/
///     ├── player.ron
///     └── opponent.ron
/// ```
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Load battle rules from `rules.toml`, or defaults when the file is absent.
    pub fn load_config(&self) -> LoadResult<GameConfig> {
        let path = self.data_dir.join("rules.toml");
        if !path.exists() {
            return Ok(GameConfig::default());
        }
        ConfigLoader::load(&path)
    }

    /// Load the catalog from `catalog.ron`.
    pub fn load_catalog(&self) -> LoadResult<Catalog> {
        CatalogLoader::load(&self.data_dir.join("catalog.ron"))
    }

    /// Load a selection from `selections/{name}.ron`.
    pub fn load_selection(&self, name: &str) -> LoadResult<Selection> {
        let path = self.data_dir.join("selections").join(format!("{}.ron", name));
        CatalogLoader::load_selection(&path)
    }

    /// Returns the data directory path.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;

    #[test]
    fn missing_rules_fall_back_to_defaults() {
        let dir = TempDir::new().unwrap();
        let factory = ContentFactory::new(dir.path());

        assert_eq!(factory.load_config().unwrap(), GameConfig::default());
        assert!(factory.load_catalog().is_err());
    }

    #[test]
    fn loads_named_selection() {
        let dir = TempDir::new().unwrap();
        fs::create_dir(dir.path().join("selections")).unwrap();
        fs::write(
            dir.path().join("selections/opponent.ron"),
            r#"(creatures: [(species: "Mossback")], rating: 1400)"#,
        )
        .unwrap();

        let selection = ContentFactory::new(dir.path())
            .load_selection("opponent")
            .unwrap();

        assert_eq!(selection.creatures.len(), 1);
        assert_eq!(selection.rating, 1400);
    }
}
