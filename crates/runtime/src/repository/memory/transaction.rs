//! Write transaction over the in-memory tables.

use std::collections::BTreeMap;
use std::sync::RwLockWriteGuard;

use battle_core::{
    AppearanceRecord, BattleId, BattleRecord, ExclusionRecord, NameId, NewBattle, NewExclusion,
    TournamentState, TournamentStateId,
};
use chrono::Utc;

use super::tables::Tables;
use crate::repository::file::SnapshotFile;
use crate::repository::{ExclusionInsert, RepositoryError, Result, TournamentTransaction};

/// Writes staged by a [`MemoryTransaction`] and not yet published.
#[derive(Default)]
struct Staged {
    battles: Vec<BattleRecord>,
    appearances: BTreeMap<NameId, AppearanceRecord>,
    exclusions: BTreeMap<NameId, ExclusionRecord>,
    last_battle_id: u32,
}

impl Staged {
    fn apply(self, state_id: TournamentStateId, tables: &mut Tables) {
        tables.sequences.battle = tables.sequences.battle.max(self.last_battle_id);
        tables
            .battles
            .entry(state_id)
            .or_default()
            .extend(self.battles);
        tables
            .appearances
            .entry(state_id)
            .or_default()
            .extend(self.appearances);

        let exclusions = tables.exclusions.entry(state_id).or_default();
        for (name_id, record) in self.exclusions {
            exclusions.entry(name_id).or_insert(record);
        }
    }
}

/// Transaction holding the store's write lock until commit or drop.
pub(crate) struct MemoryTransaction<'a> {
    tables: RwLockWriteGuard<'a, Tables>,
    snapshot: Option<&'a SnapshotFile>,
    state_id: TournamentStateId,
    staged: Staged,
}

impl<'a> MemoryTransaction<'a> {
    pub fn new(
        tables: RwLockWriteGuard<'a, Tables>,
        state_id: TournamentStateId,
        snapshot: Option<&'a SnapshotFile>,
    ) -> Self {
        let last_battle_id = tables.sequences.battle;
        Self {
            tables,
            snapshot,
            state_id,
            staged: Staged {
                last_battle_id,
                ..Staged::default()
            },
        }
    }
}

impl TournamentTransaction for MemoryTransaction<'_> {
    fn state_id(&self) -> TournamentStateId {
        self.state_id
    }

    fn tournament_state(&self) -> Result<Option<TournamentState>> {
        Ok(self.tables.tournament_states.get(&self.state_id).cloned())
    }

    fn name_exists(&self, name_id: NameId) -> Result<bool> {
        Ok(self.tables.names.contains_key(&name_id))
    }

    fn count_battles(&self, phase: u32) -> Result<u32> {
        let committed = self.tables.battles_in_phase(self.state_id, phase).count();
        let staged = self
            .staged
            .battles
            .iter()
            .filter(|battle| battle.phase == phase)
            .count();
        Ok((committed + staged) as u32)
    }

    fn insert_battle(&mut self, battle: NewBattle) -> Result<BattleRecord> {
        if battle.tournament_state_id != self.state_id {
            return Err(RepositoryError::CorruptedData(format!(
                "battle for {} staged in a transaction for {}",
                battle.tournament_state_id, self.state_id
            )));
        }

        self.staged.last_battle_id += 1;
        let id = BattleId(self.staged.last_battle_id);
        let record = BattleRecord::from_new(id, battle, Utc::now());
        self.staged.battles.push(record.clone());
        Ok(record)
    }

    fn appearance(&self, name_id: NameId) -> Result<Option<AppearanceRecord>> {
        if let Some(staged) = self.staged.appearances.get(&name_id) {
            return Ok(Some(staged.clone()));
        }
        Ok(self
            .tables
            .appearances
            .get(&self.state_id)
            .and_then(|rows| rows.get(&name_id))
            .cloned())
    }

    fn put_appearance(&mut self, record: AppearanceRecord) -> Result<()> {
        if record.tournament_state_id != self.state_id {
            return Err(RepositoryError::CorruptedData(format!(
                "appearance for {} staged in a transaction for {}",
                record.tournament_state_id, self.state_id
            )));
        }
        self.staged.appearances.insert(record.name_id, record);
        Ok(())
    }

    fn insert_exclusion(&mut self, exclusion: NewExclusion) -> Result<ExclusionInsert> {
        let name_id = exclusion.name_id;
        if self.tables.is_excluded(self.state_id, name_id)
            || self.staged.exclusions.contains_key(&name_id)
        {
            return Ok(ExclusionInsert::AlreadyExcluded);
        }

        let record = ExclusionRecord::from_new(exclusion, Utc::now());
        self.staged.exclusions.insert(name_id, record);
        Ok(ExclusionInsert::Inserted)
    }

    fn commit(self: Box<Self>) -> Result<()> {
        let MemoryTransaction {
            mut tables,
            snapshot,
            state_id,
            staged,
        } = *self;

        match snapshot {
            Some(snapshot) => {
                let mut next = (*tables).clone();
                staged.apply(state_id, &mut next);
                snapshot.save(&next)?;
                *tables = next;
            }
            None => staged.apply(state_id, &mut tables),
        }

        Ok(())
    }
}
