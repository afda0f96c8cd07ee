//! Command-line interface for musophile.
//!
//! This module provides CLI commands for searching recordings, looking up
//! a single recording, and inspecting configuration.

mod commands;

pub use commands::{Cli, Commands, run_command};
