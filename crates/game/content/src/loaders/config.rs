//! Battle rules loader.

use std::path::Path;

use arena_core::GameConfig;

use crate::loaders::{LoadResult, read_file};

/// Loader for battle rules from TOML files.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load rules from a TOML file. Keys that are absent keep their defaults.
    pub fn load(path: &Path) -> LoadResult<GameConfig> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<GameConfig> {
        let config: GameConfig = toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse rules TOML: {}", e))?;

        if config.starting_energy > config.energy_cap {
            anyhow::bail!(
                "starting_energy ({}) exceeds energy_cap ({})",
                config.starting_energy,
                config.energy_cap
            );
        }
        if config.defend_reduction_pct > 100 {
            anyhow::bail!(
                "defend_reduction_pct must be at most 100, got {}",
                config.defend_reduction_pct
            );
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_rules_keep_defaults() {
        let config = ConfigLoader::parse("energy_regen = 4\nturn_duration_ms = 30000\n").unwrap();

        assert_eq!(config.energy_regen, 4);
        assert_eq!(config.turn_duration_ms, 30_000);
        assert_eq!(config.energy_cap, GameConfig::DEFAULT_ENERGY_CAP);
        assert_eq!(config.spell_cost, GameConfig::DEFAULT_SPELL_COST);
    }

    #[test]
    fn inconsistent_energy_is_rejected() {
        let err = ConfigLoader::parse("starting_energy = 12\nenergy_cap = 10\n").unwrap_err();
        assert!(err.to_string().contains("energy_cap"));
    }
}
