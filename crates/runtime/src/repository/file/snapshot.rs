//! JSON snapshot of every store table.

use std::fs;
use std::path::{Path, PathBuf};

use crate::repository::Result;
use crate::repository::memory::Tables;

/// Whole-store snapshot persisted as one JSON document.
///
/// Saves go through a temporary sibling file and an atomic rename, so a crash
/// leaves either the previous or the new snapshot on disk.
#[derive(Clone, Debug)]
pub(crate) struct SnapshotFile {
    path: PathBuf,
}

impl SnapshotFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the snapshot, or `None` if the file does not exist yet.
    pub fn load(&self) -> Result<Option<Tables>> {
        if !self.path.exists() {
            return Ok(None);
        }

        let bytes = fs::read(&self.path)?;
        let tables: Tables = serde_json::from_slice(&bytes)?;
        tables.check_integrity()?;

        tracing::debug!("Loaded store snapshot from {}", self.path.display());

        Ok(Some(tables))
    }

    pub fn save(&self, tables: &Tables) -> Result<()> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }

        let temp_path = self.path.with_extension("json.tmp");
        let bytes = serde_json::to_vec_pretty(tables)?;

        fs::write(&temp_path, bytes)?;
        fs::rename(&temp_path, &self.path)?;

        tracing::debug!("Saved store snapshot to {}", self.path.display());

        Ok(())
    }
}
