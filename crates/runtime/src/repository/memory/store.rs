//! In-memory TournamentStore implementation.

use std::path::{Path, PathBuf};
use std::sync::{RwLock, RwLockReadGuard};

use battle_core::{
    AppearanceRecord, BattleRecord, Category, ExclusionRecord, Game, GameConfig, GameId, Name,
    NameId, PlayerIdentity, TournamentState, TournamentStateId,
};

use super::tables::Tables;
use super::transaction::MemoryTransaction;
use crate::repository::file::SnapshotFile;
use crate::repository::{RepositoryError, Result, TournamentStore, TournamentTransaction};

/// In-memory implementation of [`TournamentStore`].
///
/// All tables sit behind one `RwLock`. A transaction holds the write lock for
/// its whole lifetime, which serialises battle submissions: round numbers,
/// appearance increments and exclusion inserts can never interleave.
///
/// A store opened with [`MemoryStore::open`] also writes a JSON snapshot
/// before publishing each commit, so its contents survive restarts.
pub struct MemoryStore {
    tables: RwLock<Tables>,
    snapshot: Option<SnapshotFile>,
}

impl MemoryStore {
    /// Create a new empty, non-persistent store.
    pub fn new() -> Self {
        Self {
            tables: RwLock::new(Tables::default()),
            snapshot: None,
        }
    }

    /// Open a snapshot-backed store, loading `path` if it already exists.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let snapshot = SnapshotFile::new(path);
        let tables = snapshot.load()?.unwrap_or_default();

        tracing::info!(
            "Opened store snapshot {} ({} names, {} tournament states)",
            snapshot.path().display(),
            tables.names.len(),
            tables.tournament_states.len()
        );

        Ok(Self {
            tables: RwLock::new(tables),
            snapshot: Some(snapshot),
        })
    }

    /// Path of the backing snapshot, if this store persists.
    pub fn snapshot_path(&self) -> Option<&Path> {
        self.snapshot.as_ref().map(SnapshotFile::path)
    }

    /// True when no names have been loaded yet.
    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.read()?.names.is_empty())
    }

    /// Insert a catalog name. `(text, category)` must be unique.
    pub fn add_name(
        &self,
        text: impl Into<String>,
        category: Category,
        origin: Option<&str>,
    ) -> Result<Name> {
        let text = text.into();
        self.mutate(|tables| {
            let duplicate = tables
                .names
                .values()
                .any(|name| name.category == category && name.text == text);
            if duplicate {
                return Err(RepositoryError::UniqueViolation {
                    table: "names",
                    key: format!("{text}/{category}"),
                });
            }

            let id = tables.sequences.next_name();
            let mut name = Name::new(id, text, category);
            if let Some(origin) = origin {
                name = name.with_origin(origin);
            }
            tables.names.insert(id, name.clone());
            Ok(name)
        })
    }

    /// Insert a game drawing from `category`.
    pub fn add_game(&self, title: impl Into<String>, category: Category) -> Result<Game> {
        let title = title.into();
        self.mutate(|tables| {
            let id = tables.sequences.next_game();
            let game = Game {
                id,
                title,
                category,
            };
            tables.games.insert(id, game.clone());
            Ok(game)
        })
    }

    /// Insert or replace the configuration of an existing game.
    pub fn set_game_config(&self, config: GameConfig) -> Result<()> {
        self.mutate(|tables| {
            if !tables.games.contains_key(&config.game_id) {
                return Err(RepositoryError::MissingReference {
                    table: "game_config",
                    key: config.game_id.to_string(),
                });
            }
            tables.game_configs.insert(config.game_id, config);
            Ok(())
        })
    }

    /// Enrol a player in a game. One tournament state per (game, player).
    pub fn add_tournament_state(
        &self,
        game_id: GameId,
        player: PlayerIdentity,
    ) -> Result<TournamentState> {
        self.mutate(|tables| {
            if !tables.games.contains_key(&game_id) {
                return Err(RepositoryError::MissingReference {
                    table: "player_games",
                    key: game_id.to_string(),
                });
            }
            let duplicate = tables
                .tournament_states
                .values()
                .any(|state| state.game_id == game_id && state.player == player);
            if duplicate {
                return Err(RepositoryError::UniqueViolation {
                    table: "player_games",
                    key: format!("{game_id}/{player}"),
                });
            }

            let id = tables.sequences.next_tournament_state();
            let state = TournamentState::new(id, game_id, player);
            tables.tournament_states.insert(id, state.clone());
            Ok(state)
        })
    }

    /// Move a tournament state to another phase.
    ///
    /// Phase transitions are decided outside the engine; this is the hook
    /// such a collaborator writes through.
    pub fn set_phase(&self, state_id: TournamentStateId, phase: u32) -> Result<()> {
        self.mutate(|tables| {
            let state = tables.tournament_states.get_mut(&state_id).ok_or_else(|| {
                RepositoryError::MissingReference {
                    table: "player_games",
                    key: state_id.to_string(),
                }
            })?;
            state.current_phase = phase;
            Ok(())
        })
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Tables>> {
        self.tables
            .read()
            .map_err(|_| RepositoryError::LockPoisoned)
    }

    /// Apply `f` under the write lock, persisting first when snapshot-backed.
    fn mutate<R>(&self, f: impl FnOnce(&mut Tables) -> Result<R>) -> Result<R> {
        let mut tables = self
            .tables
            .write()
            .map_err(|_| RepositoryError::LockPoisoned)?;

        match &self.snapshot {
            Some(snapshot) => {
                let mut next = (*tables).clone();
                let result = f(&mut next)?;
                snapshot.save(&next)?;
                *tables = next;
                Ok(result)
            }
            None => f(&mut tables),
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl TournamentStore for MemoryStore {
    fn tournament_state(&self, id: TournamentStateId) -> Result<Option<TournamentState>> {
        Ok(self.read()?.tournament_states.get(&id).cloned())
    }

    fn find_tournament_state(
        &self,
        game_id: GameId,
        player: &PlayerIdentity,
    ) -> Result<Option<TournamentState>> {
        let tables = self.read()?;
        Ok(tables
            .tournament_states
            .values()
            .find(|state| state.game_id == game_id && state.player == *player)
            .cloned())
    }

    fn game(&self, id: GameId) -> Result<Option<Game>> {
        Ok(self.read()?.games.get(&id).cloned())
    }

    fn game_config(&self, game_id: GameId) -> Result<Option<GameConfig>> {
        Ok(self.read()?.game_configs.get(&game_id).cloned())
    }

    fn name(&self, id: NameId) -> Result<Option<Name>> {
        Ok(self.read()?.names.get(&id).cloned())
    }

    fn names_by_category(&self, category: Category) -> Result<Vec<Name>> {
        let tables = self.read()?;
        Ok(tables
            .names
            .values()
            .filter(|name| name.category == category)
            .cloned()
            .collect())
    }

    fn exclusions(&self, state_id: TournamentStateId) -> Result<Vec<ExclusionRecord>> {
        let tables = self.read()?;
        Ok(tables
            .exclusions
            .get(&state_id)
            .map(|rows| rows.values().cloned().collect())
            .unwrap_or_default())
    }

    fn appearances(&self, state_id: TournamentStateId) -> Result<Vec<AppearanceRecord>> {
        let tables = self.read()?;
        Ok(tables
            .appearances
            .get(&state_id)
            .map(|rows| rows.values().cloned().collect())
            .unwrap_or_default())
    }

    fn battles(&self, state_id: TournamentStateId, phase: u32) -> Result<Vec<BattleRecord>> {
        let tables = self.read()?;
        Ok(tables.battles_in_phase(state_id, phase).cloned().collect())
    }

    fn count_battles(&self, state_id: TournamentStateId, phase: u32) -> Result<u32> {
        Ok(self.read()?.battles_in_phase(state_id, phase).count() as u32)
    }

    fn count_exclusions(&self, state_id: TournamentStateId) -> Result<u32> {
        let tables = self.read()?;
        Ok(tables
            .exclusions
            .get(&state_id)
            .map_or(0, |rows| rows.len() as u32))
    }

    fn begin(&self, state_id: TournamentStateId) -> Result<Box<dyn TournamentTransaction + '_>> {
        let tables = self
            .tables
            .write()
            .map_err(|_| RepositoryError::LockPoisoned)?;

        Ok(Box::new(MemoryTransaction::new(
            tables,
            state_id,
            self.snapshot.as_ref(),
        )))
    }
}
