//! Main commands enum and primary subcommands.

use std::fmt;

use clap::{Subcommand, ValueEnum};

use crate::config_commands::ConfigCommand;

/// Available launcher commands.
#[derive(Subcommand)]
pub enum Commands {
    /// Run an interactive session that supervises the server
    Run {
        /// Start the server right away
        #[arg(long, conflicts_with = "no_auto_start")]
        start: bool,
        /// Ignore the start-on-launch setting for this session
        #[arg(long)]
        no_auto_start: bool,
    },

    /// Show resolved paths for all launcher directories
    Paths,

    /// View or change launcher settings
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },

    /// Open the web interface, a library folder or the server log
    Open {
        /// What to open
        #[arg(value_enum)]
        target: OpenTarget,
    },
}

/// Things the launcher can hand to the desktop to open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OpenTarget {
    /// The server's web interface
    Web,
    /// The pictures root in the file browser
    Pictures,
    /// The data root in the file browser
    Data,
    /// The server log file
    Logs,
}

impl fmt::Display for OpenTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Web => "web",
            Self::Pictures => "pictures",
            Self::Data => "data",
            Self::Logs => "logs",
        };
        f.write_str(name)
    }
}
