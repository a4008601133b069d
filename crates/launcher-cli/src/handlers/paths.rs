//! Paths command handler.
//!
//! Displays all resolved paths for diagnostics and debugging.

use anyhow::Result;

use crate::bootstrap::CliContext;
use crate::error::CliError;

/// Execute the paths command.
///
/// Prints the settings file, the directories derived from the current
/// configuration and the bundle layout in `key = value` format. Read-only:
/// nothing is created or persisted.
pub async fn execute(ctx: &CliContext) -> Result<()> {
    let config = ctx.config().get_configuration().await.map_err(CliError::from)?;
    let paths = ctx.config().resolve_paths(&config);

    println!("settings_file = {}", ctx.settings_file().display());
    println!("{paths}");
    println!("{}", ctx.config().platform());
    println!("{}", ctx.supervisor().bundle());
    Ok(())
}
