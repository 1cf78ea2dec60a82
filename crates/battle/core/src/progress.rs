/// Aggregate phase-1 counts for one tournament state.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct Phase1Progress {
    /// Phase-1 battles recorded so far.
    pub total_battles: u32,
    /// Distinct names that won at least one phase-1 battle.
    pub names_with_wins: u32,
    /// Names permanently excluded from this tournament.
    pub excluded_count: u32,
    /// Effective appearance cap for names that never won.
    pub max_appearances: u32,
}
