//! Battle recorder: applies one judged battle atomically.

use battle_core::{
    AppearanceRecord, BattleRecord, BattleSubmission, Decision, NameId, NewBattle, NewExclusion,
    PHASE_ONE, TournamentStateId,
};
use chrono::Utc;

use super::ensure_phase_one;
use crate::api::{EngineError, MissingEntity, Result};
use crate::repository::{ExclusionInsert, TournamentStore, TournamentTransaction};

/// Record a judged battle and return the persisted record.
///
/// Validation runs before the store is touched. Everything else happens in a
/// single transaction: the round number is derived from the battles already
/// stored for this state, both appearance rows are bumped, and a mutual
/// elimination excludes both names. Any error drops the transaction, so no
/// partial effect is ever visible.
pub fn record_battle(
    store: &dyn TournamentStore,
    state_id: TournamentStateId,
    submission: &BattleSubmission,
) -> Result<BattleRecord> {
    let decision = submission.validate()?;

    let mut tx = store.begin(state_id)?;

    let state = tx
        .tournament_state()?
        .ok_or(EngineError::NotFound(MissingEntity::TournamentState(
            state_id,
        )))?;
    ensure_phase_one(&state)?;

    let names = [submission.name1_id, submission.name2_id];
    for name_id in names {
        if !tx.name_exists(name_id)? {
            return Err(EngineError::NotFound(MissingEntity::Name(name_id)));
        }
    }

    let battle_round = tx.count_battles(PHASE_ONE)? + 1;
    let battle = tx.insert_battle(NewBattle {
        tournament_state_id: state_id,
        name1_id: submission.name1_id,
        name2_id: submission.name2_id,
        phase: PHASE_ONE,
        decision,
        battle_round,
    })?;

    for name_id in names {
        bump_appearance(tx.as_mut(), name_id, decision.is_won_by(name_id))?;
    }

    if decision.is_mutual_elimination() {
        for name_id in names {
            let outcome = tx.insert_exclusion(NewExclusion {
                tournament_state_id: state_id,
                name_id,
                battle_id: Some(battle.id),
            })?;
            if outcome == ExclusionInsert::AlreadyExcluded {
                tracing::debug!("{}: {} already excluded", state_id, name_id);
            }
        }
    }

    tx.commit()?;

    match decision {
        Decision::Winner(winner) => tracing::info!(
            "{}: round {} recorded, {} beat {}",
            state_id,
            battle_round,
            winner,
            if winner == battle.name1_id {
                battle.name2_id
            } else {
                battle.name1_id
            }
        ),
        Decision::MutualElimination => tracing::info!(
            "{}: round {} recorded, {} and {} eliminated",
            state_id,
            battle_round,
            battle.name1_id,
            battle.name2_id
        ),
    }

    Ok(battle)
}

fn bump_appearance(
    tx: &mut (dyn TournamentTransaction + '_),
    name_id: NameId,
    won: bool,
) -> Result<()> {
    let mut record = tx
        .appearance(name_id)?
        .unwrap_or_else(|| AppearanceRecord::new(tx.state_id(), name_id));
    record.record_appearance(won, Utc::now());
    tx.put_appearance(record)?;
    Ok(())
}
