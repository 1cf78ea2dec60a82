//! Row storage shared by the in-memory store and its snapshot file.

use std::collections::BTreeMap;

use battle_core::{
    AppearanceRecord, BattleId, BattleRecord, ExclusionRecord, Game, GameConfig, GameId, Name,
    NameId, TournamentState, TournamentStateId,
};
use serde::{Deserialize, Serialize};

use crate::repository::{RepositoryError, Result};

/// Last issued value of each id sequence.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) struct Sequences {
    pub name: u32,
    pub game: u32,
    pub tournament_state: u32,
    pub battle: u32,
}

impl Sequences {
    pub fn next_name(&mut self) -> NameId {
        self.name += 1;
        NameId(self.name)
    }

    pub fn next_game(&mut self) -> GameId {
        self.game += 1;
        GameId(self.game)
    }

    pub fn next_tournament_state(&mut self) -> TournamentStateId {
        self.tournament_state += 1;
        TournamentStateId(self.tournament_state)
    }
}

/// Every table of the store. Per-state tables are keyed by tournament state
/// first so a transaction only ever touches its own slice.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub(crate) struct Tables {
    pub names: BTreeMap<NameId, Name>,
    pub games: BTreeMap<GameId, Game>,
    pub game_configs: BTreeMap<GameId, GameConfig>,
    pub tournament_states: BTreeMap<TournamentStateId, TournamentState>,
    #[serde(default)]
    pub appearances: BTreeMap<TournamentStateId, BTreeMap<NameId, AppearanceRecord>>,
    #[serde(default)]
    pub battles: BTreeMap<TournamentStateId, Vec<BattleRecord>>,
    #[serde(default)]
    pub exclusions: BTreeMap<TournamentStateId, BTreeMap<NameId, ExclusionRecord>>,
    #[serde(default)]
    pub sequences: Sequences,
}

impl Tables {
    pub fn battles_in_phase(
        &self,
        state_id: TournamentStateId,
        phase: u32,
    ) -> impl Iterator<Item = &BattleRecord> {
        self.battles
            .get(&state_id)
            .into_iter()
            .flatten()
            .filter(move |battle| battle.phase == phase)
    }

    pub fn is_excluded(&self, state_id: TournamentStateId, name_id: NameId) -> bool {
        self.exclusions
            .get(&state_id)
            .is_some_and(|rows| rows.contains_key(&name_id))
    }

    /// Rejects snapshots whose rows disagree with their keys or sequences.
    pub fn check_integrity(&self) -> Result<()> {
        let corrupted = |msg: String| Err(RepositoryError::CorruptedData(msg));

        if let Some(id) = self.names.keys().next_back()
            && id.get() > self.sequences.name
        {
            return corrupted(format!("{id} is beyond the name sequence"));
        }
        if let Some(id) = self.games.keys().next_back()
            && id.get() > self.sequences.game
        {
            return corrupted(format!("{id} is beyond the game sequence"));
        }
        if let Some(id) = self.tournament_states.keys().next_back()
            && id.get() > self.sequences.tournament_state
        {
            return corrupted(format!("{id} is beyond the tournament state sequence"));
        }

        for (state_id, state) in &self.tournament_states {
            if state.id != *state_id {
                return corrupted(format!("{} filed under {state_id}", state.id));
            }
            if !self.games.contains_key(&state.game_id) {
                return corrupted(format!("{state_id} references missing {}", state.game_id));
            }
        }
        for (game_id, config) in &self.game_configs {
            if config.game_id != *game_id || !self.games.contains_key(game_id) {
                return corrupted(format!("config filed under {game_id} has no matching game"));
            }
        }

        for (state_id, rows) in &self.appearances {
            self.check_state_key(*state_id, "appearances")?;
            for (name_id, row) in rows {
                if row.tournament_state_id != *state_id || row.name_id != *name_id {
                    return corrupted(format!("appearance row filed under {state_id}/{name_id}"));
                }
            }
        }
        for (state_id, rows) in &self.exclusions {
            self.check_state_key(*state_id, "exclusions")?;
            for (name_id, row) in rows {
                if row.tournament_state_id != *state_id || row.name_id != *name_id {
                    return corrupted(format!("exclusion row filed under {state_id}/{name_id}"));
                }
            }
        }

        let mut last_battle = BattleId(0);
        for (state_id, battles) in &self.battles {
            self.check_state_key(*state_id, "battles")?;
            for battle in battles {
                if battle.tournament_state_id != *state_id {
                    return corrupted(format!("{} filed under {state_id}", battle.id));
                }
                if battle.name1_id == battle.name2_id {
                    return corrupted(format!("{} pairs a name with itself", battle.id));
                }
                if battle.winner_id.is_some() == battle.mutual_elimination {
                    return corrupted(format!("{} has no single decision", battle.id));
                }
                last_battle = last_battle.max(battle.id);
            }
        }
        if last_battle.get() > self.sequences.battle {
            return corrupted(format!("{last_battle} is beyond the battle sequence"));
        }

        Ok(())
    }

    fn check_state_key(&self, state_id: TournamentStateId, table: &str) -> Result<()> {
        if self.tournament_states.contains_key(&state_id) {
            Ok(())
        } else {
            Err(RepositoryError::CorruptedData(format!(
                "{table} reference missing {state_id}"
            )))
        }
    }
}
