//! Store contracts consumed by the phase-1 engine.

use battle_core::{
    AppearanceRecord, BattleRecord, Category, ExclusionRecord, Game, GameConfig, GameId, Name,
    NameId, NewBattle, NewExclusion, PlayerIdentity, TournamentState, TournamentStateId,
};

use super::Result;

/// Result of a conditional exclusion insert.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExclusionInsert {
    /// A new exclusion row was staged.
    Inserted,
    /// The name was already excluded for this tournament state; nothing changed.
    AlreadyExcluded,
}

/// Read access to tournament data plus the entry point for atomic writes.
///
/// Implementations must be shareable across request handlers, hence
/// `Send + Sync`. Reads outside a transaction may observe any committed state
/// but never a partially applied battle.
pub trait TournamentStore: Send + Sync {
    /// Point lookup of a tournament state.
    fn tournament_state(&self, id: TournamentStateId) -> Result<Option<TournamentState>>;

    /// Resolve the tournament state a player owns in a game.
    fn find_tournament_state(
        &self,
        game_id: GameId,
        player: &PlayerIdentity,
    ) -> Result<Option<TournamentState>>;

    /// Point lookup of a game.
    fn game(&self, id: GameId) -> Result<Option<Game>>;

    /// Per-game configuration, if one was ever stored.
    fn game_config(&self, game_id: GameId) -> Result<Option<GameConfig>>;

    /// Point lookup of a name.
    fn name(&self, id: NameId) -> Result<Option<Name>>;

    /// All names of one category, in id order.
    fn names_by_category(&self, category: Category) -> Result<Vec<Name>>;

    /// Exclusion rows of one tournament state.
    fn exclusions(&self, state_id: TournamentStateId) -> Result<Vec<ExclusionRecord>>;

    /// Appearance rows of one tournament state.
    fn appearances(&self, state_id: TournamentStateId) -> Result<Vec<AppearanceRecord>>;

    /// Battle rows of one tournament state and phase, in round order.
    fn battles(&self, state_id: TournamentStateId, phase: u32) -> Result<Vec<BattleRecord>>;

    /// Number of battles recorded for a tournament state in a phase.
    fn count_battles(&self, state_id: TournamentStateId, phase: u32) -> Result<u32> {
        Ok(self.battles(state_id, phase)?.len() as u32)
    }

    /// Number of distinct winners across a phase's battles.
    fn count_distinct_winners(&self, state_id: TournamentStateId, phase: u32) -> Result<u32> {
        let mut winners: Vec<NameId> = self
            .battles(state_id, phase)?
            .iter()
            .filter_map(|battle| battle.winner_id)
            .collect();
        winners.sort_unstable();
        winners.dedup();
        Ok(winners.len() as u32)
    }

    /// Number of exclusion rows for a tournament state.
    fn count_exclusions(&self, state_id: TournamentStateId) -> Result<u32> {
        Ok(self.exclusions(state_id)?.len() as u32)
    }

    /// Open a write transaction scoped to one tournament state.
    ///
    /// The transaction holds exclusive write access to that state until it is
    /// committed or dropped. Dropping without [`TournamentTransaction::commit`]
    /// discards every staged write.
    fn begin(&self, state_id: TournamentStateId) -> Result<Box<dyn TournamentTransaction + '_>>;
}

/// Staged writes for one tournament state, published atomically on commit.
///
/// Reads through the transaction see its own staged writes.
pub trait TournamentTransaction {
    /// The tournament state this transaction is scoped to.
    fn state_id(&self) -> TournamentStateId;

    /// The scoped tournament state as seen under the transaction's lock.
    fn tournament_state(&self) -> Result<Option<TournamentState>>;

    /// Check that a name row exists.
    fn name_exists(&self, name_id: NameId) -> Result<bool>;

    /// Battles of the scoped state in `phase`, including staged ones.
    fn count_battles(&self, phase: u32) -> Result<u32>;

    /// Stage a battle insert. The store assigns id and timestamp.
    fn insert_battle(&mut self, battle: NewBattle) -> Result<BattleRecord>;

    /// Current appearance row for a name, including staged updates.
    fn appearance(&self, name_id: NameId) -> Result<Option<AppearanceRecord>>;

    /// Stage an insert-or-replace of an appearance row.
    fn put_appearance(&mut self, record: AppearanceRecord) -> Result<()>;

    /// Stage an exclusion only if the name is not excluded yet.
    fn insert_exclusion(&mut self, exclusion: NewExclusion) -> Result<ExclusionInsert>;

    /// Publish every staged write.
    fn commit(self: Box<Self>) -> Result<()>;
}
