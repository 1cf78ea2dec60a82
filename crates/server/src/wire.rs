//! JSON request and response bodies.
use battle_core::{BattleRecord, BattleSubmission, NameId, Pairing, Phase1Progress};
use serde::{Deserialize, Serialize};

use crate::error::ApiError;

pub const NO_MORE_BATTLES: &str = "No more battles available";
pub const BATTLE_SUBMITTED: &str = "Battle submitted successfully";

/// Body of `POST /api/games/{id}/phase1/battle`.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct SubmitBattleRequest {
    pub name1_id: u32,
    pub name2_id: u32,
    /// Absent and `null` both mean no winner.
    #[serde(default)]
    pub winner_id: Option<u32>,
    #[serde(alias = "doomSelected")]
    pub mutual_elimination: bool,
}

impl SubmitBattleRequest {
    /// Parse a raw body. Every shape failure is `InvalidInput`.
    pub fn from_slice(body: &[u8]) -> Result<Self, ApiError> {
        serde_json::from_slice(body)
            .map_err(|e| ApiError::InvalidInput(format!("Invalid battle submission: {e}")))
    }

    pub fn into_submission(self) -> BattleSubmission {
        BattleSubmission {
            name1_id: NameId::from(self.name1_id),
            name2_id: NameId::from(self.name2_id),
            winner_id: self.winner_id.map(NameId::from),
            mutual_elimination: self.mutual_elimination,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct NextBattleResponse {
    pub battle: Option<Pairing>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<&'static str>,
}

impl NextBattleResponse {
    pub fn ready(pairing: Pairing) -> Self {
        Self {
            battle: Some(pairing),
            message: None,
        }
    }

    pub fn exhausted() -> Self {
        Self {
            battle: None,
            message: Some(NO_MORE_BATTLES),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SubmitBattleResponse {
    pub battle: BattleRecord,
    pub message: &'static str,
}

#[derive(Debug, Serialize)]
pub struct ProgressResponse {
    pub progress: Phase1Progress,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}
