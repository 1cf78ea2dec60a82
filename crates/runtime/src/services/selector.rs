//! Battle selector: picks the next pairing for a tournament state.

use std::collections::{HashMap, HashSet};

use battle_core::{
    AppearanceCap, AppearanceRecord, Name, NameId, TournamentStateId, draw_pair, eligible_names,
};
use rand::Rng;

use super::{ensure_phase_one, require_state};
use crate::api::{EngineError, MissingEntity, NextBattle, Result};
use crate::repository::TournamentStore;

/// Select two eligible names to compare next, or report exhaustion.
///
/// Candidates are the game's category minus this state's exclusions; the
/// appearance cap then filters out names that appeared too often without
/// winning. Has no side effects on the store.
pub fn next_battle<R>(
    store: &dyn TournamentStore,
    state_id: TournamentStateId,
    rng: &mut R,
) -> Result<NextBattle>
where
    R: Rng + ?Sized,
{
    let state = require_state(store, state_id)?;
    ensure_phase_one(&state)?;

    let game = store
        .game(state.game_id)?
        .ok_or(EngineError::NotFound(MissingEntity::Game(state.game_id)))?;
    let cap = AppearanceCap::from_config(store.game_config(game.id)?.as_ref());

    let excluded: HashSet<NameId> = store
        .exclusions(state_id)?
        .into_iter()
        .map(|exclusion| exclusion.name_id)
        .collect();
    let candidates: Vec<Name> = store
        .names_by_category(game.category)?
        .into_iter()
        .filter(|name| !excluded.contains(&name.id))
        .collect();

    if candidates.len() < 2 {
        tracing::info!(
            "{}: only {} candidate(s) left, no battle available",
            state_id,
            candidates.len()
        );
        return Ok(NextBattle::Exhausted);
    }

    let appearances: HashMap<NameId, AppearanceRecord> = store
        .appearances(state_id)?
        .into_iter()
        .map(|record| (record.name_id, record))
        .collect();
    let eligible = eligible_names(&candidates, &appearances, cap);

    tracing::debug!(
        "{}: {} candidates, {} eligible (cap {})",
        state_id,
        candidates.len(),
        eligible.len(),
        cap.get()
    );

    match draw_pair(&eligible, rng) {
        Some(pairing) => Ok(NextBattle::Ready(pairing)),
        None => {
            tracing::info!(
                "{}: only {} eligible name(s) left, no battle available",
                state_id,
                eligible.len()
            );
            Ok(NextBattle::Exhausted)
        }
    }
}
