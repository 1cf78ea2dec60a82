//! Content factory for loading seed data from a directory.

use std::path::{Path, PathBuf};

use crate::loaders::{GameRoster, LoadResult, NameCatalog, NameLoader, RosterLoader};

/// Content factory that loads all seed content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── names.ron
/// └── games.toml
/// ```
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    /// Creates a new content factory pointing to a data directory.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Factory over the sample data shipped with this crate.
    pub fn bundled() -> Self {
        Self::new(Path::new(env!("CARGO_MANIFEST_DIR")).join("data"))
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Load the name catalog from `names.ron`.
    pub fn load_names(&self) -> LoadResult<NameCatalog> {
        NameLoader::load(&self.data_dir.join("names.ron"))
    }

    /// Load the game roster from `games.toml`.
    pub fn load_roster(&self) -> LoadResult<GameRoster> {
        RosterLoader::load(&self.data_dir.join("games.toml"))
    }
}
