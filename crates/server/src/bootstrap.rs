//! Store construction and first-run seeding.
use std::sync::Arc;

use anyhow::{Context, Result};
use battle_content::{ContentFactory, GameRoster, NameCatalog};
use battle_core::GameConfig;
use battle_runtime::{EngineConfig, MemoryStore, Phase1Engine, RepositoryError};

use crate::config::ServerConfig;

/// Rows created while seeding an empty store.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SeedSummary {
    pub names: usize,
    pub skipped_names: usize,
    pub games: usize,
    pub tournament_states: usize,
}

/// Open (or create) the configured store, seed it on first run, and wrap it
/// in an engine.
pub fn build_engine(config: &ServerConfig) -> Result<Phase1Engine> {
    let store = open_store(config)?;

    if store.is_empty()? {
        let factory = match &config.data_dir {
            Some(dir) => ContentFactory::new(dir),
            None => ContentFactory::bundled(),
        };
        tracing::info!("Seeding empty store from {}", factory.data_dir().display());
        let summary = seed_from_factory(&store, &factory)?;
        tracing::info!(
            names = summary.names,
            games = summary.games,
            tournament_states = summary.tournament_states,
            "Store seeded"
        );
    } else {
        tracing::debug!("Store already populated; skipping seed content");
    }

    let engine_config = EngineConfig {
        rng_seed: config.rng_seed,
    };
    Ok(Phase1Engine::new(Arc::new(store), engine_config))
}

fn open_store(config: &ServerConfig) -> Result<MemoryStore> {
    match config.snapshot_path() {
        Some(path) => {
            tracing::info!("Using snapshot store at {}", path.display());
            MemoryStore::open(path.clone())
                .with_context(|| format!("Failed to open store snapshot {}", path.display()))
        }
        None => {
            tracing::info!("Using in-memory store; nothing survives a restart");
            Ok(MemoryStore::new())
        }
    }
}

pub fn seed_from_factory(store: &MemoryStore, factory: &ContentFactory) -> Result<SeedSummary> {
    let catalog = factory.load_names()?;
    let roster = factory.load_roster()?;
    seed_store(store, &catalog, &roster)
}

/// Insert catalog names and roster games in file order.
///
/// Duplicate names are skipped with a warning; any other store failure
/// aborts seeding.
pub fn seed_store(
    store: &MemoryStore,
    catalog: &NameCatalog,
    roster: &GameRoster,
) -> Result<SeedSummary> {
    let mut summary = SeedSummary::default();

    for entry in &catalog.names {
        match store.add_name(entry.text.trim(), entry.category, entry.origin.as_deref()) {
            Ok(_) => summary.names += 1,
            Err(RepositoryError::UniqueViolation { key, .. }) => {
                tracing::warn!("Skipping duplicate catalog name {}", key);
                summary.skipped_names += 1;
            }
            Err(err) => return Err(err).context("Failed to insert catalog name"),
        }
    }

    for entry in &roster.games {
        let game = store
            .add_game(entry.title.as_str(), entry.category)
            .with_context(|| format!("Failed to insert game `{}`", entry.title))?;
        summary.games += 1;

        if let Some(cap) = entry.max_phase1_appearances {
            store.set_game_config(GameConfig::new(game.id).with_max_phase1_appearances(cap))?;
        }

        for player in entry.player_identities() {
            store
                .add_tournament_state(game.id, player)
                .with_context(|| format!("Failed to enrol player in `{}`", entry.title))?;
            summary.tournament_states += 1;
        }
    }

    Ok(summary)
}

#[cfg(test)]
mod tests {
    use battle_content::{GameEntry, NameEntry};
    use battle_core::{Category, GameId, PlayerIdentity};
    use battle_runtime::TournamentStore;

    use super::*;

    fn entry(text: &str, category: Category) -> NameEntry {
        NameEntry {
            text: text.to_string(),
            category,
            origin: None,
        }
    }

    #[test]
    fn seeds_names_games_and_players_in_order() {
        let store = MemoryStore::new();
        let catalog = NameCatalog {
            names: vec![
                entry("Ada", Category::Girl),
                entry("Ada", Category::Girl),
                entry("Ada", Category::Boy),
            ],
        };
        let roster = GameRoster {
            games: vec![GameEntry {
                title: "Girls".to_string(),
                category: Category::Girl,
                max_phase1_appearances: Some(5),
                players: vec!["sam@example.com".to_string(), "kim@example.com".to_string()],
            }],
        };

        let summary = seed_store(&store, &catalog, &roster).unwrap();

        assert_eq!(summary.names, 2);
        assert_eq!(summary.skipped_names, 1);
        assert_eq!(summary.games, 1);
        assert_eq!(summary.tournament_states, 2);

        let config = store.game_config(GameId(1)).unwrap().unwrap();
        assert_eq!(config.max_phase1_appearances, Some(5));

        let kim = PlayerIdentity::new("kim@example.com").unwrap();
        let state = store.find_tournament_state(GameId(1), &kim).unwrap().unwrap();
        assert!(state.in_phase_one());
    }

    #[test]
    fn bundled_content_seeds_a_playable_store() {
        let store = MemoryStore::new();
        let summary = seed_from_factory(&store, &ContentFactory::bundled()).unwrap();

        assert!(summary.tournament_states > 0);
        assert!(store.names_by_category(Category::Girl).unwrap().len() >= 2);
    }

    #[test]
    fn populated_snapshots_are_not_reseeded() {
        let dir = tempfile::TempDir::new().unwrap();
        let config = ServerConfig {
            store_path: Some(dir.path().join("store.json")),
            ..ServerConfig::default()
        };

        build_engine(&config).unwrap();
        let engine = build_engine(&config).unwrap();

        let girls = engine.store().names_by_category(Category::Girl).unwrap();
        let mut texts: Vec<_> = girls.iter().map(|name| name.text.as_str()).collect();
        let total = texts.len();
        texts.dedup();
        assert_eq!(texts.len(), total);
    }
}
