//! Appearance-cap rule deciding which candidates may be shown next.
//!
//! A name that has never appeared is always eligible. A name that has won at
//! least once recirculates without limit. A name that has appeared but never
//! won stays eligible only while its appearance count is below the cap.
use std::collections::HashMap;

use crate::ids::NameId;
use crate::name::Name;
use crate::records::AppearanceRecord;
use crate::tournament::GameConfig;

/// Effective appearance cap for names that have never won.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct AppearanceCap(pub u32);

impl AppearanceCap {
    pub const DEFAULT: Self = Self(3);

    /// Resolves the cap from an optional game config, falling back to the default.
    pub fn from_config(config: Option<&GameConfig>) -> Self {
        config
            .and_then(|config| config.max_phase1_appearances)
            .map(Self)
            .unwrap_or(Self::DEFAULT)
    }

    #[inline]
    pub const fn get(self) -> u32 {
        self.0
    }
}

impl Default for AppearanceCap {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Returns true if a name with the given appearance history may be drawn.
pub fn is_eligible(appearance: Option<&AppearanceRecord>, cap: AppearanceCap) -> bool {
    match appearance {
        None => true,
        Some(record) if record.has_won => true,
        Some(record) => record.appearance_count < cap.get(),
    }
}

/// Filters `candidates` down to the names eligible under `cap`.
pub fn eligible_names<'a>(
    candidates: &'a [Name],
    appearances: &HashMap<NameId, AppearanceRecord>,
    cap: AppearanceCap,
) -> Vec<&'a Name> {
    candidates
        .iter()
        .filter(|name| is_eligible(appearances.get(&name.id), cap))
        .collect()
}
