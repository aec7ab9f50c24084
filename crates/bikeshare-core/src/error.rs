//! Error types for bikeshare
//!
//! This module defines the error types used throughout the bikeshare crates.
//! All errors are derived from `thiserror` for convenient error handling
//! and automatic `From` implementations.
//!
//! # Example
//!
//! ```
//! use bikeshare_core::error::{BikeshareError, Result};
//!
//! fn example_function() -> Result<()> {
//!     // This will automatically convert io::Error to BikeshareError
//!     let _file = std::fs::read_to_string("nonexistent.csv")?;
//!     Ok(())
//! }
//! ```

use std::path::PathBuf;
use thiserror::Error;

use crate::types::City;

/// Main error type for bikeshare operations
///
/// Invalid answers at a prompt are never errors; they are re-asked. The
/// variants here cover the conditions that end a session.
#[derive(Error, Debug)]
pub enum BikeshareError {
    /// IO error occurred
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed CSV record
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// The data file for a city does not exist
    #[error("No data file for {city} at {}", path.display())]
    DatasetNotFound {
        /// The requested city
        city: City,
        /// The path that was looked up
        path: PathBuf,
    },

    /// A required column is absent from the header row
    #[error("Missing column '{column}' in {}", file.display())]
    MissingColumn {
        /// The file being read
        file: PathBuf,
        /// The column that was expected
        column: String,
    },

    /// A start time value could not be parsed
    #[error("Invalid timestamp '{value}' in {} at line {line}", file.display())]
    InvalidTimestamp {
        /// The file being read
        file: PathBuf,
        /// 1-based line number, counting the header
        line: u64,
        /// The text that failed to parse
        value: String,
    },

    /// A cell holds a number outside the range its column allows
    #[error("Invalid {column} '{value}' in {} at line {line}", file.display())]
    InvalidValue {
        /// The file being read
        file: PathBuf,
        /// 1-based line number, counting the header
        line: u64,
        /// The column the cell belongs to
        column: String,
        /// The rejected value
        value: String,
    },

    /// City name outside the supported set
    #[error("Unknown city: {0}")]
    UnknownCity(String),

    /// Invalid argument
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// The input stream ended while waiting for an answer
    #[error("Input closed")]
    InputClosed,
}

/// Convenience type alias for Results in bikeshare
pub type Result<T> = std::result::Result<T, BikeshareError>;
