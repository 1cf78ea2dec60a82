//! Cloneable façade over the phase-1 services.
//!
//! [`Phase1Engine`] owns the injected store and the random source used for
//! pair selection. It is cheap to clone and safe to share between request
//! handlers.
use std::sync::{Arc, Mutex, PoisonError};

use battle_core::{
    BattleRecord, BattleSubmission, GameId, Pairing, Phase1Progress, PlayerIdentity,
    TournamentState, TournamentStateId,
};
use rand::SeedableRng;
use rand::rngs::StdRng;

use super::errors::Result;
use crate::repository::TournamentStore;
use crate::services;

/// Result of asking for the next battle.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NextBattle {
    Ready(Pairing),
    /// Fewer than two eligible names remain. Not an error.
    Exhausted,
}

impl NextBattle {
    pub fn into_pairing(self) -> Option<Pairing> {
        match self {
            NextBattle::Ready(pairing) => Some(pairing),
            NextBattle::Exhausted => None,
        }
    }

    pub fn is_exhausted(&self) -> bool {
        matches!(self, NextBattle::Exhausted)
    }
}

/// Engine configuration.
#[derive(Debug, Clone, Default)]
pub struct EngineConfig {
    /// Seed for pair selection. `None` seeds from OS entropy.
    pub rng_seed: Option<u64>,
}

impl EngineConfig {
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng_seed: Some(seed),
        }
    }
}

/// Entry point for selecting, recording and reporting phase-1 battles.
#[derive(Clone)]
pub struct Phase1Engine {
    store: Arc<dyn TournamentStore>,
    rng: Arc<Mutex<StdRng>>,
}

impl Phase1Engine {
    pub fn new(store: Arc<dyn TournamentStore>, config: EngineConfig) -> Self {
        let rng = match config.rng_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            store,
            rng: Arc::new(Mutex::new(rng)),
        }
    }

    /// The injected store.
    pub fn store(&self) -> &Arc<dyn TournamentStore> {
        &self.store
    }

    /// Resolve the tournament state a player owns in a game.
    pub fn tournament_state_for(
        &self,
        game_id: GameId,
        player: &PlayerIdentity,
    ) -> Result<Option<TournamentState>> {
        Ok(self.store.find_tournament_state(game_id, player)?)
    }

    /// Pick the next pairing to show, or [`NextBattle::Exhausted`].
    pub fn next_battle(&self, state_id: TournamentStateId) -> Result<NextBattle> {
        // A panic while holding the RNG cannot leave it in an invalid state.
        let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
        services::next_battle(self.store.as_ref(), state_id, &mut *rng)
    }

    /// Validate and record a judged battle.
    pub fn submit_battle(
        &self,
        state_id: TournamentStateId,
        submission: &BattleSubmission,
    ) -> Result<BattleRecord> {
        services::record_battle(self.store.as_ref(), state_id, submission)
    }

    /// Aggregate phase-1 counts.
    pub fn progress(&self, state_id: TournamentStateId) -> Result<Phase1Progress> {
        services::phase1_progress(self.store.as_ref(), state_id)
    }
}
