//! CLI module for Pinboard.
//!
//! Exposes the layout engine and the viewport loader from the command line:
//! one-shot layouts, scripted scroll simulations and configuration helpers.

mod commands;
mod output;

use clap::Parser;
pub use commands::Cli;
use tracing_subscriber::EnvFilter;

use crate::error::PinboardError;

/// Runs the CLI.
///
/// Parses command-line arguments, installs logging and executes the
/// appropriate command.
///
/// # Errors
///
/// Returns an error if the command execution fails.
pub fn run() -> Result<(), PinboardError> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    cli.execute()
}

/// Installs the stderr log subscriber. `RUST_LOG` wins over `verbose`.
fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .or_else(|_| EnvFilter::try_new(default_level))
                .unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .try_init();
}
