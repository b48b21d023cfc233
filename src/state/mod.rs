/// State management module
///
/// This module handles the photo table's data and view logic:
/// - Shared data structures (data.rs)
/// - The static catalog tables and the join step (library.rs)
/// - The three-state column sort toggle (sort.rs)
/// - Filter criteria and the filter/sort query (query.rs)

pub mod data;
pub mod library;
pub mod query;
pub mod sort;
