//! Command-line launcher for the bundled PhotoPrism server.
#![deny(unsafe_code)]

pub mod bootstrap;
pub mod commands;
pub mod config_commands;
pub mod desktop;
pub mod error;
pub mod handlers;
pub mod parser;
pub mod session;

// Re-export primary types for convenient access
pub use bootstrap::{CliConfig, CliContext, bootstrap};
pub use commands::{Commands, OpenTarget};
pub use config_commands::ConfigCommand;
pub use error::CliError;
pub use parser::Cli;
pub use session::SessionCommand;
