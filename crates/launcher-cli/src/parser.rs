//! Main CLI parser and top-level argument handling.
//!
//! This module defines the root CLI structure with global options.

use std::path::PathBuf;

use clap::Parser;

use launcher_core::paths::{BUNDLE_DIR_ENV, SETTINGS_PATH_ENV};

use crate::commands::Commands;

/// Command-line interface for the PhotoPrism launcher.
///
/// Without a subcommand the launcher opens an interactive session, the same
/// as `run`.
#[derive(Parser)]
#[command(name = "photoprism-launcher")]
#[command(about = "Start, stop and configure a local PhotoPrism server")]
#[command(version)]
pub struct Cli {
    /// Settings file to use instead of the platform default
    #[arg(long, global = true, env = SETTINGS_PATH_ENV)]
    pub settings: Option<PathBuf>,

    /// Directory containing the photoprism-server executable
    #[arg(long = "bundle-dir", global = true, env = BUNDLE_DIR_ENV)]
    pub bundle_dir: Option<PathBuf>,

    /// Enable verbose/debug output
    #[arg(short = 'v', long = "verbose", global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}
