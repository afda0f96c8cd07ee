//! CLI command definitions and dispatch.
//!
//! Each subcommand is implemented in its own submodule:
//! - `search`: Bootstrap from a page or token, run one search, emit HTML
//! - `show`: Look up one recording by MusicBrainz ID
//! - `settings`: Show or initialize the config file

mod search;
mod settings;
mod show;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tokio::runtime::Runtime;

use crate::config::{self, Config};
use crate::search::{EnrichmentStrategy, SearchAttribute};

pub use search::cmd_search;
pub use settings::cmd_config;
pub use show::cmd_show;

/// Musophile search CLI
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Use this config file instead of the default location
    #[arg(long, global = true, env = "MUSOPHILE_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand)]
pub enum Commands {
    /// Search recordings and render the result list as HTML
    Search {
        /// Search term
        term: String,
        /// Field to search: recording, artist, release or tag
        #[arg(short = 't', long = "type")]
        attribute: Option<SearchAttribute>,
        /// Maximum number of results
        #[arg(short, long)]
        limit: Option<u32>,
        /// Track matching strategy: proxy or direct
        #[arg(short, long)]
        strategy: Option<EnrichmentStrategy>,
        /// Saved search page to read the token inputs from
        #[arg(long)]
        page: Option<PathBuf>,
        /// Spotify access token (used when no page is given)
        #[arg(long, env = "MUSOPHILE_ACCESS_TOKEN", hide_env_values = true)]
        token: Option<String>,
        /// The proxy backend holds a Spotify token for you (when no page is given)
        #[arg(long)]
        has_token: bool,
        /// Write the result HTML here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Show a single recording by MusicBrainz ID
    Show {
        /// MusicBrainz recording ID
        mbid: String,
    },
    /// Show the effective configuration
    Config {
        /// Write the default config file if none exists
        #[arg(long)]
        init: bool,
    },
}

/// Run the specified CLI command.
pub fn run_command(cli: &Cli) -> anyhow::Result<()> {
    let config = load_config(cli.config.as_deref());

    match &cli.command {
        Commands::Search {
            term,
            attribute,
            limit,
            strategy,
            page,
            token,
            has_token,
            output,
        } => {
            let rt = Runtime::new()?;
            cmd_search(
                &rt,
                &config,
                search::SearchArgs {
                    term,
                    attribute: *attribute,
                    limit: *limit,
                    strategy: *strategy,
                    page: page.as_deref(),
                    token: token.as_deref(),
                    has_token: *has_token,
                    output: output.as_deref(),
                },
            )
        }
        Commands::Show { mbid } => {
            let rt = Runtime::new()?;
            cmd_show(&rt, &config, mbid)
        }
        Commands::Config { init } => cmd_config(&config, cli.config.as_deref(), *init),
    }
}

fn load_config(path: Option<&std::path::Path>) -> Config {
    match path {
        Some(path) => config::load_from(path),
        None => config::load(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_search_args() {
        let cli = Cli::try_parse_from([
            "musophile", "search", "Yesterday", "--type", "artist", "--limit", "5", "--strategy",
            "direct",
        ])
        .unwrap();

        match cli.command {
            Commands::Search {
                term,
                attribute,
                limit,
                strategy,
                ..
            } => {
                assert_eq!(term, "Yesterday");
                assert_eq!(attribute, Some(SearchAttribute::Artist));
                assert_eq!(limit, Some(5));
                assert_eq!(strategy, Some(EnrichmentStrategy::Direct));
            }
            _ => panic!("expected search command"),
        }
    }

    #[test]
    fn test_has_token_flag() {
        let cli = Cli::try_parse_from(["musophile", "search", "Yesterday", "--has-token"]).unwrap();
        match cli.command {
            Commands::Search { has_token, .. } => assert!(has_token),
            _ => panic!("expected search command"),
        }
    }

    #[test]
    fn test_rejects_unknown_type() {
        let result = Cli::try_parse_from(["musophile", "search", "x", "--type", "isrc"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_global_config_flag() {
        let cli = Cli::try_parse_from(["musophile", "show", "abc", "--config", "/tmp/m.toml"])
            .unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/m.toml")));
    }
}
