//! Photo table: photos joined with their album and uploader
//!
//! The catalog's three static tables are joined once into enriched
//! photos; each change to the search text, the uploader/album filters
//! or the column sort produces a new `Criteria` and a fresh `query`.

pub mod error;
pub mod state;

pub use error::{CatalogError, DataIntegrityError};
pub use state::data::{Album, EnrichedPhoto, Photo, Sex, User};
pub use state::library::{join, Catalog};
pub use state::query::{query, Criteria, NameFilter};
pub use state::sort::{SortDirection, SortField, SortIndicator, SortState};
