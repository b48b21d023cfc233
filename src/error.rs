/// Error types for the photo catalog
///
/// Filtering and sorting cannot fail; only building the catalog can.

use std::path::PathBuf;
use thiserror::Error;

/// A foreign key in the static tables does not resolve to exactly one record
///
/// This is a defect in the fixture data, not a runtime condition to retry.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DataIntegrityError {
    #[error("photo {photo_id} references missing album {album_id}")]
    MissingAlbum { photo_id: i64, album_id: i64 },

    #[error("album {album_id} references missing user {user_id}")]
    MissingUser { album_id: i64, user_id: i64 },

    #[error("album id {id} appears more than once")]
    DuplicateAlbum { id: i64 },

    #[error("user id {id} appears more than once")]
    DuplicateUser { id: i64 },
}

/// Errors raised while loading the catalog fixtures
#[derive(Error, Debug)]
pub enum CatalogError {
    /// Fixture file could not be read
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Fixture file is not valid JSON for its table
    #[error("Failed to parse {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Tables parsed but do not join
    #[error("Data integrity error: {0}")]
    Integrity(#[from] DataIntegrityError),
}

/// Result type for catalog operations
pub type Result<T> = std::result::Result<T, CatalogError>;
