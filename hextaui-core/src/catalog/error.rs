//! Catalog error types

use std::path::PathBuf;
use thiserror::Error;

use super::CatalogKind;

/// Errors raised while building or loading a catalog
#[derive(Error, Debug)]
pub enum CatalogError {
    /// Two entries in the same catalog share an id
    #[error("Duplicate id '{id}' in {kind} catalog")]
    DuplicateId { kind: CatalogKind, id: String },

    /// Id is empty or not usable as a URL path segment
    #[error("Invalid id '{0}': must be lowercase alphanumeric with single hyphens")]
    InvalidId(String),

    /// Entry has no display title
    #[error("Entry '{0}' has no title")]
    MissingTitle(String),

    /// Block without a category
    #[error("Block '{0}' has no category")]
    MissingCategory(String),

    #[error("Unknown category '{0}'")]
    UnknownCategory(String),

    #[error("Unknown catalog '{0}'. Expected 'components' or 'blocks'")]
    UnknownKind(String),

    /// Failed to read a catalog data file
    #[error("Failed to read catalog file {path}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse a catalog data file
    #[error("Failed to parse catalog file {origin}")]
    ParseError {
        origin: String,
        #[source]
        source: serde_yaml_ng::Error,
    },
}
