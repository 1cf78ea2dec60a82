//! Bookkeeping rows written by the battle recorder.
use chrono::{DateTime, Utc};

use crate::ids::{BattleId, NameId, TournamentStateId};
use crate::submission::Decision;

/// Appearance counter for one name within one tournament state.
///
/// `has_won` is monotonic: once set it is never cleared.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct AppearanceRecord {
    pub tournament_state_id: TournamentStateId,
    pub name_id: NameId,
    pub appearance_count: u32,
    pub has_won: bool,
    pub updated_at: Option<DateTime<Utc>>,
}

impl AppearanceRecord {
    /// A record for a name that has not appeared yet.
    pub fn new(tournament_state_id: TournamentStateId, name_id: NameId) -> Self {
        Self {
            tournament_state_id,
            name_id,
            appearance_count: 0,
            has_won: false,
            updated_at: None,
        }
    }

    /// Counts one more appearance, latching `has_won` if this one was a win.
    pub fn record_appearance(&mut self, won: bool, at: DateTime<Utc>) {
        self.appearance_count = self.appearance_count.saturating_add(1);
        self.has_won |= won;
        self.updated_at = Some(at);
    }
}

/// A battle about to be inserted; the store assigns id and timestamp.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewBattle {
    pub tournament_state_id: TournamentStateId,
    pub name1_id: NameId,
    pub name2_id: NameId,
    pub phase: u32,
    pub decision: Decision,
    pub battle_round: u32,
}

/// Immutable log entry for one judged battle.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct BattleRecord {
    pub id: BattleId,
    pub tournament_state_id: TournamentStateId,
    pub name1_id: NameId,
    pub name2_id: NameId,
    pub phase: u32,
    pub winner_id: Option<NameId>,
    pub mutual_elimination: bool,
    pub battle_round: u32,
    pub created_at: DateTime<Utc>,
}

impl BattleRecord {
    pub fn from_new(id: BattleId, battle: NewBattle, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            tournament_state_id: battle.tournament_state_id,
            name1_id: battle.name1_id,
            name2_id: battle.name2_id,
            phase: battle.phase,
            winner_id: battle.decision.winner(),
            mutual_elimination: battle.decision.is_mutual_elimination(),
            battle_round: battle.battle_round,
            created_at,
        }
    }

    pub fn involves(&self, name_id: NameId) -> bool {
        self.name1_id == name_id || self.name2_id == name_id
    }
}

/// An exclusion about to be inserted.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewExclusion {
    pub tournament_state_id: TournamentStateId,
    pub name_id: NameId,
    pub battle_id: Option<BattleId>,
}

/// Permanent removal of a name from future pairings for one tournament state.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct ExclusionRecord {
    pub tournament_state_id: TournamentStateId,
    pub name_id: NameId,
    pub battle_id: Option<BattleId>,
    pub created_at: DateTime<Utc>,
}

impl ExclusionRecord {
    pub fn from_new(exclusion: NewExclusion, created_at: DateTime<Utc>) -> Self {
        Self {
            tournament_state_id: exclusion.tournament_state_id,
            name_id: exclusion.name_id,
            battle_id: exclusion.battle_id,
            created_at,
        }
    }
}
