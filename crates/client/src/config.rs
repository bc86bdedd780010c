//! Match runner configuration.
use std::env;
use std::path::PathBuf;
use std::str::FromStr;

use arena_core::Difficulty;

/// Where match content lives and which selections face each other.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClientConfig {
    pub data_dir: PathBuf,
    pub difficulty: Difficulty,
    /// Selection file name (without extension) for side A.
    pub player: String,
    /// Selection file name (without extension) for side B.
    pub opponent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            difficulty: Difficulty::Easy,
            player: "player".to_owned(),
            opponent: "opponent".to_owned(),
        }
    }
}

impl ClientConfig {
    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `ARENA_DATA_DIR` - Directory with rules, catalog and selections (default: data)
    /// - `ARENA_DIFFICULTY` - easy, medium, hard or expert (default: easy)
    /// - `ARENA_PLAYER` - Selection for side A (default: player)
    /// - `ARENA_OPPONENT` - Selection for side B (default: opponent)
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(dir) = lookup("ARENA_DATA_DIR") {
            config.data_dir = PathBuf::from(dir);
        }
        if let Some(difficulty) = read(&lookup, "ARENA_DIFFICULTY") {
            config.difficulty = difficulty;
        }
        if let Some(player) = lookup("ARENA_PLAYER") {
            config.player = player;
        }
        if let Some(opponent) = lookup("ARENA_OPPONENT") {
            config.opponent = opponent;
        }

        config
    }
}

fn read<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<T>
where
    T: FromStr,
{
    lookup(key)?.trim().parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_overrides_and_ignores_unknown_difficulty() {
        let config = ClientConfig::from_lookup(|key| match key {
            "ARENA_DATA_DIR" => Some("/srv/arena".to_owned()),
            "ARENA_DIFFICULTY" => Some("Hard".to_owned()),
            _ => None,
        });
        assert_eq!(config.data_dir, PathBuf::from("/srv/arena"));
        assert_eq!(config.difficulty, Difficulty::Hard);
        assert_eq!(config.player, "player");

        let config = ClientConfig::from_lookup(|key| {
            (key == "ARENA_DIFFICULTY").then(|| "nightmare".to_owned())
        });
        assert_eq!(config.difficulty, Difficulty::Easy);
    }
}
