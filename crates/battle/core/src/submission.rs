//! Validation of a judged battle before it reaches the store.
use crate::ids::NameId;

/// Outcome of a battle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Decision {
    /// One of the two names won.
    Winner(NameId),
    /// Both names are removed from further consideration ("DOOM").
    MutualElimination,
}

impl Decision {
    pub fn winner(&self) -> Option<NameId> {
        match self {
            Decision::Winner(id) => Some(*id),
            Decision::MutualElimination => None,
        }
    }

    pub fn is_mutual_elimination(&self) -> bool {
        matches!(self, Decision::MutualElimination)
    }

    pub fn is_won_by(&self, name_id: NameId) -> bool {
        self.winner() == Some(name_id)
    }
}

/// Structural problems with a battle submission.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum SubmissionError {
    #[error("Name IDs must be different")]
    SameNames { name_id: NameId },

    #[error("Must select either winner or DOOM")]
    MissingDecision,

    #[error("Cannot have both winner and DOOM selected")]
    ConflictingDecision { winner_id: NameId },

    #[error("Winner must be one of the battle names")]
    WinnerNotInBattle {
        winner_id: NameId,
        name1_id: NameId,
        name2_id: NameId,
    },
}

/// A battle judgment as submitted, before validation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BattleSubmission {
    pub name1_id: NameId,
    pub name2_id: NameId,
    pub winner_id: Option<NameId>,
    pub mutual_elimination: bool,
}

impl BattleSubmission {
    pub fn winner(name1_id: NameId, name2_id: NameId, winner_id: NameId) -> Self {
        Self {
            name1_id,
            name2_id,
            winner_id: Some(winner_id),
            mutual_elimination: false,
        }
    }

    pub fn mutual_elimination(name1_id: NameId, name2_id: NameId) -> Self {
        Self {
            name1_id,
            name2_id,
            winner_id: None,
            mutual_elimination: true,
        }
    }

    /// Checks the structural rules and folds winner/flag into a [`Decision`].
    ///
    /// Duplicate names are rejected first, whatever the decision fields hold.
    pub fn validate(&self) -> Result<Decision, SubmissionError> {
        if self.name1_id == self.name2_id {
            return Err(SubmissionError::SameNames {
                name_id: self.name1_id,
            });
        }

        match (self.winner_id, self.mutual_elimination) {
            (Some(winner_id), true) => Err(SubmissionError::ConflictingDecision { winner_id }),
            (None, false) => Err(SubmissionError::MissingDecision),
            (None, true) => Ok(Decision::MutualElimination),
            (Some(winner_id), false) => {
                if winner_id == self.name1_id || winner_id == self.name2_id {
                    Ok(Decision::Winner(winner_id))
                } else {
                    Err(SubmissionError::WinnerNotInBattle {
                        winner_id,
                        name1_id: self.name1_id,
                        name2_id: self.name2_id,
                    })
                }
            }
        }
    }
}
