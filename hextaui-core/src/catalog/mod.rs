//! HextaUI Catalog - component and block metadata
//!
//! This module holds the metadata records for every catalog entry and the
//! read-only tables used to look them up.
//!
//! # Architecture
//!
//! ```text
//! data/*.yaml (embedded or --data-dir)
//!     │
//!     ├── <kind>.yaml           ← base entries
//!     └── <kind>.snippets.yaml  ← usage/install overrides by id
//!            │
//!            ▼
//!     CatalogIndex (per kind)  ← merged, validated, ordered
//!            │
//!            ▼
//!     Registry                 ← shared by the server and the CLI
//! ```

mod entry;
mod error;
mod index;
mod registry;

pub use entry::{is_valid_slug, non_blank, CatalogEntry, CatalogKind, Category, EntrySnippets};
pub use error::CatalogError;
pub use index::{CatalogIndex, EntryFile, PrevNext, SnippetFile};
pub use registry::Registry;
