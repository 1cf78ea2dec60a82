//! Unified error type surfaced by the engine API.
//!
//! Wraps submission validation, precondition failures and store errors so the
//! HTTP boundary can map each kind to a distinct status code.
use std::fmt;

use battle_core::{GameId, NameId, SubmissionError, TournamentStateId};
use thiserror::Error;

pub use crate::repository::RepositoryError;

pub type Result<T> = std::result::Result<T, EngineError>;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("{0} not found")]
    NotFound(MissingEntity),

    #[error("{state_id} is in phase {actual}, expected phase {expected}")]
    WrongPhase {
        state_id: TournamentStateId,
        expected: u32,
        actual: u32,
    },

    #[error(transparent)]
    InvalidInput(#[from] SubmissionError),

    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

impl EngineError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, EngineError::NotFound(_))
    }
}

/// The row a lookup expected to find.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum MissingEntity {
    TournamentState(TournamentStateId),
    Game(GameId),
    Name(NameId),
}

impl fmt::Display for MissingEntity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MissingEntity::TournamentState(id) => write!(f, "tournament {}", id),
            MissingEntity::Game(id) => write!(f, "{}", id),
            MissingEntity::Name(id) => write!(f, "{}", id),
        }
    }
}
