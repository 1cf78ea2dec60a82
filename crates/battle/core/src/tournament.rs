//! Games, their configuration, and per-player tournament states.
use std::fmt;

use crate::ids::{GameId, TournamentStateId};
use crate::name::Category;

/// The only phase with executable selection and elimination rules.
pub const PHASE_ONE: u32 = 1;

/// Already-authenticated identity of a player (an email address upstream).
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct PlayerIdentity(String);

impl PlayerIdentity {
    /// Returns `None` for an empty or whitespace-only identity.
    pub fn new(raw: impl Into<String>) -> Option<Self> {
        let raw = raw.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(trimmed.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PlayerIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A game instance; every tournament in it draws from one name category.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Game {
    pub id: GameId,
    pub title: String,
    pub category: Category,
}

/// Per-game tunables. One-to-one with a [`Game`], read-only for the engine.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GameConfig {
    pub game_id: GameId,
    /// Appearance cap for names that have never won. `None` means the default.
    pub max_phase1_appearances: Option<u32>,
}

impl GameConfig {
    pub fn new(game_id: GameId) -> Self {
        Self {
            game_id,
            max_phase1_appearances: None,
        }
    }

    pub fn with_max_phase1_appearances(mut self, cap: u32) -> Self {
        self.max_phase1_appearances = Some(cap);
        self
    }
}

/// One player's progress record within one game.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TournamentState {
    pub id: TournamentStateId,
    pub game_id: GameId,
    pub player: PlayerIdentity,
    pub current_phase: u32,
    // Later-phase workflow flags; nothing in phase 1 reads them.
    pub approved: bool,
    pub bracket_active: bool,
}

impl TournamentState {
    pub fn new(id: TournamentStateId, game_id: GameId, player: PlayerIdentity) -> Self {
        Self {
            id,
            game_id,
            player,
            current_phase: PHASE_ONE,
            approved: false,
            bracket_active: false,
        }
    }

    pub fn with_phase(mut self, phase: u32) -> Self {
        self.current_phase = phase;
        self
    }

    #[inline]
    pub fn in_phase_one(&self) -> bool {
        self.current_phase == PHASE_ONE
    }
}
