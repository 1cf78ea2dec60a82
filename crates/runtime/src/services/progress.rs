//! Progress reporter: aggregate phase-1 counts for a tournament state.

use battle_core::{AppearanceCap, PHASE_ONE, Phase1Progress, TournamentStateId};

use super::require_state;
use crate::api::Result;
use crate::repository::TournamentStore;

/// Summarise phase-1 progress. Read-only and valid in any phase.
pub fn phase1_progress(
    store: &dyn TournamentStore,
    state_id: TournamentStateId,
) -> Result<Phase1Progress> {
    let state = require_state(store, state_id)?;
    let cap = AppearanceCap::from_config(store.game_config(state.game_id)?.as_ref());

    Ok(Phase1Progress {
        total_battles: store.count_battles(state_id, PHASE_ONE)?,
        names_with_wins: store.count_distinct_winners(state_id, PHASE_ONE)?,
        excluded_count: store.count_exclusions(state_id)?,
        max_appearances: cap.get(),
    })
}
