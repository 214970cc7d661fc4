//! Catalog registry
//!
//! Owns the components and blocks tables. Data comes either from the YAML
//! files compiled into the binary or from a data directory laid out the
//! same way:
//!
//! ```text
//! data/
//! ├── components.yaml            # entries (required)
//! ├── components.snippets.yaml   # per-id overrides (optional)
//! ├── blocks.yaml
//! └── blocks.snippets.yaml
//! ```

use std::path::Path;

use super::index::{EntryFile, SnippetFile};
use super::{CatalogError, CatalogIndex, CatalogKind};

const EMBEDDED_COMPONENTS: &str = include_str!("../../data/components.yaml");
const EMBEDDED_COMPONENT_SNIPPETS: &str = include_str!("../../data/components.snippets.yaml");
const EMBEDDED_BLOCKS: &str = include_str!("../../data/blocks.yaml");
const EMBEDDED_BLOCK_SNIPPETS: &str = include_str!("../../data/blocks.snippets.yaml");

/// Both catalog tables, built once at startup
#[derive(Debug, Clone)]
pub struct Registry {
    components: CatalogIndex,
    blocks: CatalogIndex,
}

impl Registry {
    pub fn new(components: CatalogIndex, blocks: CatalogIndex) -> Self {
        Self { components, blocks }
    }

    /// Build from the data files bundled with the crate
    pub fn embedded() -> Result<Self, CatalogError> {
        let components = CatalogIndex::from_files(
            CatalogKind::Components,
            EntryFile::from_yaml(EMBEDDED_COMPONENTS, "embedded components.yaml")?,
            Some(SnippetFile::from_yaml(
                EMBEDDED_COMPONENT_SNIPPETS,
                "embedded components.snippets.yaml",
            )?),
        )?;

        let blocks = CatalogIndex::from_files(
            CatalogKind::Blocks,
            EntryFile::from_yaml(EMBEDDED_BLOCKS, "embedded blocks.yaml")?,
            Some(SnippetFile::from_yaml(
                EMBEDDED_BLOCK_SNIPPETS,
                "embedded blocks.snippets.yaml",
            )?),
        )?;

        Ok(Self::new(components, blocks))
    }

    /// Build from `<kind>.yaml` and optional `<kind>.snippets.yaml` files in `dir`
    pub fn load_from_dir(dir: &Path) -> Result<Self, CatalogError> {
        tracing::info!("Loading catalog data from {}", dir.display());

        let components = load_catalog(dir, CatalogKind::Components)?;
        let blocks = load_catalog(dir, CatalogKind::Blocks)?;

        Ok(Self::new(components, blocks))
    }

    /// Load from `dir` when given, otherwise use the embedded data
    pub fn load(data_dir: Option<&Path>) -> Result<Self, CatalogError> {
        match data_dir {
            Some(dir) => Self::load_from_dir(dir),
            None => Self::embedded(),
        }
    }

    pub fn catalog(&self, kind: CatalogKind) -> &CatalogIndex {
        match kind {
            CatalogKind::Components => &self.components,
            CatalogKind::Blocks => &self.blocks,
        }
    }

    pub fn components(&self) -> &CatalogIndex {
        &self.components
    }

    pub fn blocks(&self) -> &CatalogIndex {
        &self.blocks
    }
}

fn load_catalog(dir: &Path, kind: CatalogKind) -> Result<CatalogIndex, CatalogError> {
    let entries_path = dir.join(format!("{}.yaml", kind.segment()));
    let content = std::fs::read_to_string(&entries_path).map_err(|source| {
        CatalogError::ReadError {
            path: entries_path.clone(),
            source,
        }
    })?;
    let entries = EntryFile::from_yaml(&content, &entries_path.display().to_string())?;

    let snippets_path = dir.join(format!("{}.snippets.yaml", kind.segment()));
    let snippets = if snippets_path.exists() {
        let content = std::fs::read_to_string(&snippets_path).map_err(|source| {
            CatalogError::ReadError {
                path: snippets_path.clone(),
                source,
            }
        })?;
        Some(SnippetFile::from_yaml(
            &content,
            &snippets_path.display().to_string(),
        )?)
    } else {
        tracing::debug!("No snippets file at {}", snippets_path.display());
        None
    };

    CatalogIndex::from_files(kind, entries, snippets)
}
