//! Game roster loader.

use std::path::Path;

use battle_core::{Category, PlayerIdentity};
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

/// A game to create, with its cap and the players to enrol.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameEntry {
    pub title: String,
    pub category: Category,
    /// Omitted means the engine default.
    #[serde(default)]
    pub max_phase1_appearances: Option<u32>,
    #[serde(default)]
    pub players: Vec<String>,
}

impl GameEntry {
    /// Player identities, skipping blank entries.
    pub fn player_identities(&self) -> Vec<PlayerIdentity> {
        self.players
            .iter()
            .filter_map(|raw| PlayerIdentity::new(raw.as_str()))
            .collect()
    }
}

/// Game roster structure for TOML files.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GameRoster {
    #[serde(default)]
    pub games: Vec<GameEntry>,
}

/// Loader for the game roster from TOML files.
pub struct RosterLoader;

impl RosterLoader {
    /// Load the game roster from a TOML file.
    pub fn load(path: &Path) -> LoadResult<GameRoster> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<GameRoster> {
        let roster: GameRoster = toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse game roster TOML: {}", e))?;

        for game in &roster.games {
            if game.max_phase1_appearances == Some(0) {
                anyhow::bail!(
                    "Game `{}` sets max_phase1_appearances to 0; no name could ever appear",
                    game.title
                );
            }
        }

        Ok(roster)
    }
}
