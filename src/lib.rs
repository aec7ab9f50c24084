//! bikeshare - Explore US bike-share trip data from local CSV files
//!
//! This library provides functionality to:
//! - Prompt for a city and optional month/day filters
//! - Load a city's trips and derive month, weekday and hour columns
//! - Compute travel-time, station, duration and rider statistics
//! - Page through raw trips and render reports as text or JSON
//!
//! # Examples
//!
//! ```no_run
//! use bikeshare::{
//!     data_loader::DataLoader,
//!     output::get_formatter,
//!     prompt::Prompter,
//!     session::Session,
//! };
//! use std::io;
//!
//! fn main() -> bikeshare::Result<()> {
//!     let loader = DataLoader::new(".");
//!     let prompter = Prompter::new(io::stdin().lock(), io::stdout());
//!     let mut session = Session::new(prompter, loader, get_formatter(false));
//!     session.run()?;
//!     Ok(())
//! }
//! ```

pub mod aggregation;
pub mod cli;
pub mod data_loader;
pub mod error;
pub mod output;
pub mod prompt;
pub mod selection;
pub mod session;
pub mod viewer;

// Re-export commonly used types
pub use bikeshare_core::{City, FilterSelection, Month, TripFilter, TripTable};
pub use error::{BikeshareError, Result};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
