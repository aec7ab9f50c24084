//! Error types for bikeshare
//!
//! The error enum lives in `bikeshare-core` so the domain types can
//! construct it; it is re-exported here for the binary and integration
//! tests.

pub use bikeshare_core::error::{BikeshareError, Result};
