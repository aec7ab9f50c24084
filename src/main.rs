//! bikeshare - Explore US bike-share trip data interactively

use bikeshare::{
    cli::Cli,
    data_loader::DataLoader,
    error::{BikeshareError, Result},
    output::get_formatter,
    prompt::Prompter,
    session::Session,
};
use clap::Parser;
use std::io;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // RUST_LOG wins; otherwise --verbose selects info for our crates
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if cli.verbose {
            tracing_subscriber::EnvFilter::new("bikeshare=info,bikeshare_core=debug")
        } else {
            tracing_subscriber::EnvFilter::new("warn")
        }
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    info!("Reading city data from {}", cli.data_dir.display());

    let show_progress = !cli.json && is_terminal::is_terminal(io::stdout());
    let loader = DataLoader::new(&cli.data_dir).with_progress(show_progress);
    let prompter = Prompter::new(io::stdin().lock(), io::stdout());
    let mut session = Session::new(prompter, loader, get_formatter(cli.json));

    match session.run() {
        Ok(_) => Ok(()),
        Err(BikeshareError::InputClosed) => {
            info!("Input closed, exiting");
            Ok(())
        }
        Err(e) => Err(e),
    }
}
