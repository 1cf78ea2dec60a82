//! Content loaders for reading seed data from files.

pub mod factory;
pub mod names;
pub mod roster;

pub use factory::ContentFactory;
pub use names::{NameCatalog, NameEntry, NameLoader};
pub use roster::{GameEntry, GameRoster, RosterLoader};

use std::path::Path;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read file {}: {}", path.display(), e))
}
