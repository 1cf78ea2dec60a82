//! Name catalog loader.

use std::path::Path;

use battle_core::Category;
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

/// One catalog entry. Ids are assigned by the store in file order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NameEntry {
    pub text: String,
    pub category: Category,
    #[serde(default)]
    pub origin: Option<String>,
}

/// Name catalog structure for RON files.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NameCatalog {
    pub names: Vec<NameEntry>,
}

/// Loader for the name catalog from RON files.
pub struct NameLoader;

impl NameLoader {
    /// Load the name catalog from a RON file.
    ///
    /// Blank entries are rejected so a typo cannot seed an empty name.
    pub fn load(path: &Path) -> LoadResult<NameCatalog> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<NameCatalog> {
        let catalog: NameCatalog = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse name catalog RON: {}", e))?;

        if let Some(index) = catalog
            .names
            .iter()
            .position(|entry| entry.text.trim().is_empty())
        {
            anyhow::bail!("Name catalog entry {} has empty text", index);
        }

        Ok(catalog)
    }
}
