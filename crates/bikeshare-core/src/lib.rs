//! Core types, vocabularies, and filters for bikeshare
//!
//! This crate provides the domain model shared by the loader, the
//! statistics reporters, and the interactive front end: the supported
//! cities, the month/day vocabularies, trip records, and the filter
//! applied to a loaded trip table.

pub mod error;
pub mod filters;
pub mod types;
pub mod vocabulary;

// Re-export commonly used types
pub use error::{BikeshareError, Result};
pub use filters::TripFilter;
pub use types::{City, FilterMode, FilterSelection, Month, TableColumns, Trip, TripTable};
pub use vocabulary::Vocabulary;
