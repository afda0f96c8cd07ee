//! Musophile - recording search with playable Spotify matches.
//!
//! Searches MusicBrainz for recordings, matches each one to a Spotify track
//! (through the backend proxy or directly), and renders the result list as
//! HTML with an "add to library" action per recording.

pub mod cli;
pub mod config;
pub mod error;
pub mod search;
#[cfg(test)]
pub mod test_utils;

use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

fn main() -> anyhow::Result<()> {
    let args = cli::Cli::parse();

    // Initialize logging; stdout is reserved for the rendered HTML
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("musophile=info"));
    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
        .with(filter)
        .init();

    cli::run_command(&args)
}
