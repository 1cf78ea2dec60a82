//! Phase-1 elimination rules shared by the runtime and tooling.
//!
//! `battle-core` defines the tournament data model (names, tournament states,
//! appearance/battle/exclusion records) and the pure decision logic the
//! runtime builds on:
//! - [`submission`] validates a judged battle before anything is written
//! - [`eligibility`] applies the appearance cap to a candidate pool
//! - [`pairing`] draws a uniform pair from the eligible names
//!
//! Nothing here touches storage; the runtime crate owns the store contract.
pub mod eligibility;
pub mod ids;
pub mod name;
pub mod pairing;
pub mod progress;
pub mod records;
pub mod submission;
pub mod tournament;

pub use eligibility::{AppearanceCap, eligible_names, is_eligible};
pub use ids::{BattleId, GameId, NameId, TournamentStateId};
pub use name::{Category, Name, UNKNOWN_ORIGIN, UnknownCategory};
pub use pairing::{NameCard, Pairing, draw_pair};
pub use progress::Phase1Progress;
pub use records::{AppearanceRecord, BattleRecord, ExclusionRecord, NewBattle, NewExclusion};
pub use submission::{BattleSubmission, Decision, SubmissionError};
pub use tournament::{Game, GameConfig, PHASE_ONE, PlayerIdentity, TournamentState};
