//! CLI interface for bikeshare
//!
//! The program is driven by interactive prompts; these flags only tune
//! where data comes from and how reports are printed. Running with no
//! flags reads the city CSV files from the current directory.
//!
//! # Example
//!
//! ```bash
//! # Read chicago.csv, new_york_city.csv and washington.csv from ./data
//! bikeshare --data-dir data
//!
//! # Emit each report as JSON and show informational logs
//! bikeshare --json --verbose
//! ```

use clap::Parser;
use std::path::PathBuf;

/// Explore US bike-share trip data
#[derive(Parser, Debug, Clone)]
#[command(name = "bikeshare")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Directory containing the city CSV files
    #[arg(long, short = 'd', env = "BIKESHARE_DATA_DIR", default_value = ".")]
    pub data_dir: PathBuf,

    /// Print each report as JSON instead of narrative text
    #[arg(long)]
    pub json: bool,

    /// Show informational output (default is quiet mode with only warnings and errors)
    #[arg(long, short = 'v')]
    pub verbose: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::parse_from(["bikeshare"]);
        assert!(!cli.json);
        assert!(!cli.verbose);
    }

    #[test]
    fn test_cli_flags() {
        let cli = Cli::parse_from(["bikeshare", "--data-dir", "/tmp/trips", "--json", "-v"]);
        assert_eq!(cli.data_dir, PathBuf::from("/tmp/trips"));
        assert!(cli.json);
        assert!(cli.verbose);
    }
}
