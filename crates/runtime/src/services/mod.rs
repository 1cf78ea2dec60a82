//! Phase-1 engine services.
//!
//! Each service is a plain function over `&dyn TournamentStore` so it can run
//! against any store implementation:
//! - [`selector`] picks the next pairing (read-only)
//! - [`recorder`] applies a judged battle in one transaction
//! - [`progress`] derives aggregate counts (read-only)

pub mod progress;
pub mod recorder;
pub mod selector;

pub use progress::phase1_progress;
pub use recorder::record_battle;
pub use selector::next_battle;

use battle_core::{PHASE_ONE, TournamentState, TournamentStateId};

use crate::api::{EngineError, MissingEntity, Result};
use crate::repository::TournamentStore;

fn require_state(
    store: &dyn TournamentStore,
    state_id: TournamentStateId,
) -> Result<TournamentState> {
    store
        .tournament_state(state_id)?
        .ok_or(EngineError::NotFound(MissingEntity::TournamentState(state_id)))
}

fn ensure_phase_one(state: &TournamentState) -> Result<()> {
    if state.in_phase_one() {
        Ok(())
    } else {
        Err(EngineError::WrongPhase {
            state_id: state.id,
            expected: PHASE_ONE,
            actual: state.current_phase,
        })
    }
}
