//! Configuration management subcommands.

use std::path::PathBuf;

use clap::Subcommand;

/// Configuration management commands.
#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Show the current configuration
    Show {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// Set the pictures root (originals and import live below it)
    SetPictures {
        /// New pictures root; `~` is expanded and relative paths are made absolute
        path: PathBuf,
    },
    /// Set the data root (storage and config live below it)
    SetData {
        /// New data root; `~` is expanded and relative paths are made absolute
        path: PathBuf,
    },
    /// Start the server when the launcher opens
    SetAutoStart {
        #[arg(action = clap::ArgAction::Set)]
        enabled: bool,
    },
}
